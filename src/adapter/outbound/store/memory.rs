//! In-process timestamp store.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::Result;
use crate::port::outbound::store::TimestampStore;

/// Volatile store; state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl TimestampStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.entries.lock().get(key).copied()
    }

    fn set(&self, key: &str, ts: i64) -> Result<()> {
        self.entries.lock().insert(key.to_string(), ts);
        Ok(())
    }
}
