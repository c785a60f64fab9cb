//! In-memory graph storage. Nodes are people, links are connections;
//! the snapshot shape serializes directly to the wire format consumers
//! of the graph expect.

use parking_lot::Mutex;
use serde::Serialize;

use crate::connection::Connection;
use crate::person::Person;

/// Storage seam for scraped people and discovered connections. Writes
/// are idempotent on identity: a person is keyed by id, a connection by
/// its endpoint pair regardless of kind.
pub trait GraphStore: Send + Sync {
    /// Insert or replace a person. Returns true when the id was new.
    fn upsert_person(&self, person: Person) -> bool;

    /// Insert a connection unless one already links the same pair in
    /// either direction; the first recorded connection wins. Returns
    /// true when the connection was stored.
    fn upsert_connection(&self, connection: Connection) -> bool;
}

/// Serializable graph snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphData {
    pub nodes: Vec<Person>,
    pub links: Vec<Connection>,
}

impl GraphData {
    fn has_pair(&self, a: &str, b: &str) -> bool {
        self.links.iter().any(|link| {
            (link.source == a && link.target == b) || (link.source == b && link.target == a)
        })
    }
}

/// Process-local [`GraphStore`].
#[derive(Default)]
pub struct MemoryGraph {
    inner: Mutex<GraphData>,
}

impl MemoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> GraphData {
        self.inner.lock().clone()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.inner.lock().links.len()
    }
}

impl GraphStore for MemoryGraph {
    fn upsert_person(&self, person: Person) -> bool {
        let mut data = self.inner.lock();
        if let Some(existing) = data.nodes.iter_mut().find(|node| node.id == person.id) {
            *existing = person;
            false
        } else {
            data.nodes.push(person);
            true
        }
    }

    fn upsert_connection(&self, connection: Connection) -> bool {
        let mut data = self.inner.lock();
        if data.has_pair(&connection.source, &connection.target) {
            return false;
        }
        data.links.push(connection);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::RelationKind;

    #[test]
    fn test_person_upsert_replaces_by_id() {
        let graph = MemoryGraph::new();
        let mut person = Person::new("Plato");
        assert!(graph.upsert_person(person.clone()));

        person.country = "Greece".into();
        assert!(!graph.upsert_person(person));

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.nodes[0].country, "Greece");
    }

    #[test]
    fn test_connection_pair_dedup_is_direction_blind() {
        let graph = MemoryGraph::new();

        let forward = Connection::new("socrates", "plato", RelationKind::Mentor).unwrap();
        let reverse = Connection::new("plato", "socrates", RelationKind::Student).unwrap();

        assert!(graph.upsert_connection(forward));
        assert!(!graph.upsert_connection(reverse));

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.links.len(), 1);
        assert_eq!(snapshot.links[0].kind, RelationKind::Mentor);
    }
}
