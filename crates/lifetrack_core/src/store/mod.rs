//! Key-value store wrapper used by every repository.
//!
//! # Responsibility
//! - Map typed values to JSON text under a closed set of keys.
//! - Absorb backend and (de)serialization failures.
//!
//! # Invariants
//! - No operation returns an error or panics; failures are logged and
//!   degrade to "absent" (reads) or "not written" (writes).
//! - `clear()` only touches keys listed in [`StorageKey::ALL`].

mod backend;

pub use backend::{KvBackend, MemoryBackend, SqliteBackend, StoreError, StoreResult};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Entries persisted by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Tasks,
    Notes,
    Goals,
    Events,
    Theme,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Tasks,
        StorageKey::Notes,
        StorageKey::Goals,
        StorageKey::Events,
        StorageKey::Theme,
    ];

    /// Physical key written to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "lifetrack_tasks",
            Self::Notes => "lifetrack_notes",
            Self::Goals => "lifetrack_goals",
            Self::Events => "lifetrack_events",
            Self::Theme => "lifetrack_theme",
        }
    }
}

/// JSON-over-backend store. Constructed explicitly and lent to repositories.
pub struct Storage {
    backend: Box<dyn KvBackend>,
}

impl Storage {
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store backed by a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Reads and decodes `key`.
    ///
    /// Returns `None` when the key is unset, unreadable or malformed.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = match self.backend.read(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    "event=store_get module=store status=error key={} error={}",
                    key.as_str(),
                    err
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=store_get module=store status=malformed key={} bytes={} error={}",
                    key.as_str(),
                    raw.len(),
                    err
                );
                None
            }
        }
    }

    /// Encodes and writes `value` under `key`. Returns whether it was stored.
    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|text| self.backend.write(key.as_str(), &text).map(|()| text.len()));

        match result {
            Ok(bytes) => {
                debug!(
                    "event=store_set module=store status=ok key={} bytes={}",
                    key.as_str(),
                    bytes
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=store_set module=store status=error key={} error={}",
                    key.as_str(),
                    err
                );
                false
            }
        }
    }

    pub fn remove(&self, key: StorageKey) {
        if let Err(err) = self.backend.delete(key.as_str()) {
            warn!(
                "event=store_remove module=store status=error key={} error={}",
                key.as_str(),
                err
            );
        }
    }

    /// Removes every application key.
    pub fn clear(&self) {
        for key in StorageKey::ALL {
            self.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KvBackend, MemoryBackend, Storage, StorageKey, StoreError, StoreResult};

    struct BrokenBackend;

    impl KvBackend for BrokenBackend {
        fn read(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }

        fn delete(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }
    }

    #[test]
    fn get_returns_none_for_unset_key() {
        let store = Storage::in_memory();
        assert_eq!(store.get::<Vec<u32>>(StorageKey::Tasks), None);
    }

    #[test]
    fn set_then_get_decodes_value() {
        let store = Storage::in_memory();
        assert!(store.set(StorageKey::Goals, &vec!["a", "b"]));
        assert_eq!(
            store.get::<Vec<String>>(StorageKey::Goals),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn malformed_content_reads_as_absent() {
        let backend = MemoryBackend::new();
        backend.write("lifetrack_notes", "{not json").unwrap();
        let store = Storage::new(backend);
        assert_eq!(store.get::<Vec<String>>(StorageKey::Notes), None);
    }

    #[test]
    fn backend_failures_are_absorbed() {
        let store = Storage::new(BrokenBackend);
        assert_eq!(store.get::<String>(StorageKey::Theme), None);
        assert!(!store.set(StorageKey::Theme, "dark"));
        store.remove(StorageKey::Theme);
        store.clear();
    }

    #[test]
    fn clear_removes_application_keys() {
        let backend = MemoryBackend::new();
        let store = Storage::new(backend);
        store.set(StorageKey::Tasks, &Vec::<u8>::new());
        store.set(StorageKey::Theme, "dark");

        store.clear();

        assert_eq!(store.get::<Vec<u8>>(StorageKey::Tasks), None);
        assert_eq!(store.get::<String>(StorageKey::Theme), None);
    }
}
