//! Keyed record persistence
//!
//! Records are JSON strings under fixed keys, so the same code runs against
//! browser LocalStorage, a directory of files, or memory in tests.
//!
//! Backends live in `platform`; this module defines the seam and the typed
//! records stored through it.

pub mod records;

use std::collections::HashMap;

use crate::error::Result;

/// String key -> JSON string storage
pub trait KeyValueStore {
    /// Read a record; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a record, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Delete a record (missing keys are not an error)
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
