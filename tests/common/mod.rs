use std::sync::atomic::{AtomicBool, Ordering};

use planning_core::{
    errors::{PlanningError, Result},
    storage::{KeyValueStore, MemoryStore},
};

/// Memory-backed store whose writes can be toggled to fail, for exercising
/// persistence error paths.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        self.inner.get(namespace, key)
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PlanningError::Storage("disk full".into()));
        }
        self.inner.set(namespace, key, value)
    }
}
