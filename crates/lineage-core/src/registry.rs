use std::collections::HashSet;

use parking_lot::RwLock;

/// Case-insensitive set of subject names that have already been
/// scraped. Grows monotonically; discovery scans it to spot known
/// figures co-occurring in new page text.
#[derive(Default)]
pub struct KnownNames {
    names: RwLock<HashSet<String>>,
}

impl KnownNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scraped subject. Returns true when the name was new.
    pub fn insert(&self, name: &str) -> bool {
        self.names.write().insert(name.to_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.read().contains(&name.to_lowercase())
    }

    /// Snapshot of every known name, lowercased. Unordered.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.names.read().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}
