use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector: {0}")]
    Selector(String),
    #[error("No article content found")]
    MissingContent,
}

pub type ParseResult<T> = Result<T, ParseError>;

/// One label/value row from an infobox-style key/value table.
#[derive(Debug, Clone)]
pub struct InfoboxRow {
    pub label: String,
    pub value: String,
}

/// An eagerly parsed article. All text the pipeline needs is pulled
/// out of the HTML tree up front, so the page is a cheap owned value
/// that can cross task boundaries, and a response cache can slot in
/// behind `PageSource` later without touching callers.
#[derive(Debug, Clone, Default)]
pub struct ArticlePage {
    pub title: Option<String>,
    /// Main-content paragraphs, in document order, empty ones dropped.
    pub paragraphs: Vec<String>,
    /// Second- and third-level section headings, in document order.
    pub headings: Vec<String>,
    pub infobox: Vec<InfoboxRow>,
    /// Raw text of the infobox `.bday` / `.dday` cells, when present.
    pub birth_date_text: Option<String>,
    pub death_date_text: Option<String>,
}

fn selector(source: &str) -> ParseResult<Selector> {
    Selector::parse(source).map_err(|e| ParseError::Selector(e.to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl ArticlePage {
    /// Parse encyclopedia HTML into its queryable parts. Fails only
    /// when the main content area is missing entirely; sparse pages
    /// parse fine and the extractors degrade to defaults.
    pub fn parse(html: &str) -> ParseResult<Self> {
        let document = Html::parse_document(html);

        let content_sel = selector("#mw-content-text")?;
        let paragraph_sel = selector("#mw-content-text p")?;
        let heading_sel = selector("#mw-content-text h2, #mw-content-text h3")?;
        let title_sel = selector("h1")?;
        let row_sel = selector(".infobox tr")?;
        let label_sel = selector("th")?;
        let value_sel = selector("td")?;
        let bday_sel = selector(".infobox .bday")?;
        let dday_sel = selector(".infobox .dday")?;

        if document.select(&content_sel).next().is_none() {
            return Err(ParseError::MissingContent);
        }

        let title = document.select(&title_sel).next().map(element_text);

        let paragraphs: Vec<String> = document
            .select(&paragraph_sel)
            .map(element_text)
            .filter(|p| !p.is_empty())
            .collect();

        let headings: Vec<String> = document
            .select(&heading_sel)
            .map(element_text)
            .filter(|h| !h.is_empty())
            .collect();

        let infobox = document
            .select(&row_sel)
            .filter_map(|row| {
                let label = row.select(&label_sel).next().map(element_text)?;
                let value = row.select(&value_sel).next().map(element_text)?;
                Some(InfoboxRow { label, value })
            })
            .collect();

        let birth_date_text = document.select(&bday_sel).next().map(element_text);
        let death_date_text = document.select(&dday_sel).next().map(element_text);

        Ok(Self {
            title,
            paragraphs,
            headings,
            infobox,
            birth_date_text,
            death_date_text,
        })
    }

    /// The first content paragraph, if the page has any.
    #[must_use]
    pub fn first_paragraph(&self) -> Option<&str> {
        self.paragraphs.first().map(String::as_str)
    }

    /// Look up an infobox value whose label contains `label`.
    #[must_use]
    pub fn infobox_value(&self, label: &str) -> Option<&str> {
        self.infobox
            .iter()
            .find(|row| row.label.contains(label))
            .map(|row| row.value.as_str())
    }

    /// Full visible text of the main content area: every paragraph,
    /// then every section heading, newline separated.
    #[must_use]
    pub fn content_text(&self) -> String {
        let mut content = String::new();
        for paragraph in &self.paragraphs {
            content.push_str(paragraph);
            content.push('\n');
        }
        for heading in &self.headings {
            content.push_str(heading);
            content.push('\n');
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><body>
        <h1>Isaac Newton</h1>
        <table class="infobox">
            <tr><th>Born</th><td><span class="bday">1643-01-04</span> Woolsthorpe, Lincolnshire, England</td></tr>
            <tr><th>Died</th><td><span class="dday">1727-03-31</span> Kensington</td></tr>
            <tr><th>Nationality</th><td>English[1]</td></tr>
        </table>
        <div id="mw-content-text">
            <p>Isaac Newton (1643-1727) was an English mathematician and physicist.</p>
            <p>He formulated the laws of motion.</p>
            <h2>Life</h2>
            <h3>Later years</h3>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_paragraphs_and_headings() {
        let page = ArticlePage::parse(SAMPLE).unwrap();

        assert_eq!(page.paragraphs.len(), 2);
        assert!(page.first_paragraph().unwrap().contains("mathematician"));
        assert_eq!(page.headings, vec!["Life", "Later years"]);
        assert_eq!(page.title.as_deref(), Some("Isaac Newton"));
    }

    #[test]
    fn test_infobox_lookup() {
        let page = ArticlePage::parse(SAMPLE).unwrap();

        assert!(page.infobox_value("Nationality").unwrap().contains("English"));
        assert!(page.infobox_value("Born").unwrap().contains("Woolsthorpe"));
        assert!(page.infobox_value("Occupation").is_none());
    }

    #[test]
    fn test_bday_dday() {
        let page = ArticlePage::parse(SAMPLE).unwrap();

        assert_eq!(page.birth_date_text.as_deref(), Some("1643-01-04"));
        assert_eq!(page.death_date_text.as_deref(), Some("1727-03-31"));
    }

    #[test]
    fn test_content_text_order() {
        let page = ArticlePage::parse(SAMPLE).unwrap();
        let content = page.content_text();

        let laws = content.find("laws of motion").unwrap();
        let life = content.find("Life").unwrap();
        assert!(laws < life);
    }

    #[test]
    fn test_missing_content_area() {
        let result = ArticlePage::parse("<html><body><p>nothing</p></body></html>");
        assert!(matches!(result, Err(ParseError::MissingContent)));
    }
}
