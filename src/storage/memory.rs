use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use crate::errors::Result;

use super::KeyValueStore;

/// In-memory store for tests and embedding in hosts that manage their own
/// persistence.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&(namespace.to_owned(), key.to_owned())).cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert((namespace.to_owned(), key.to_owned()), value.to_owned());
        Ok(())
    }
}
