use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

/// Dedup tracker for concurrently requested subjects. Check and insert
/// happen under one lock, so two racing requests for the same key can
/// never both proceed. The returned guard removes its entry on drop,
/// which makes removal unconditional on success and failure paths
/// alike.
#[derive(Default)]
pub struct InFlight {
    keys: Mutex<HashSet<String>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a key. `None` means another request for the same key is
    /// already in flight and the caller should report a conflict
    /// immediately rather than queue.
    #[must_use]
    pub fn begin(self: &Arc<Self>, key: &str) -> Option<InFlightGuard> {
        let key = key.to_lowercase();
        let mut keys = self.keys.lock();
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: Arc::clone(self),
            key,
        })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.lock().contains(&key.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.lock().is_empty()
    }
}

/// Live claim on an in-flight key; dropping it releases the key.
pub struct InFlightGuard {
    set: Arc<InFlight>,
    key: String,
}

impl InFlightGuard {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.keys.lock().remove(&self.key);
    }
}
