//! In-memory slot storage.
//!
//! Clones share the same slots, so a caller can hand one clone to a
//! repository and keep another to look at what was written.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::storage::traits::SlotStorage;

#[derive(Debug, Clone, Default)]
pub struct MemoryConnection {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory slot storage lock poisoned"))
    }

    /// Number of slots currently holding a value
    pub fn slot_count(&self) -> Result<usize> {
        Ok(self.slots()?.len())
    }
}

impl SlotStorage for MemoryConnection {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<bool> {
        Ok(self.slots()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let connection = MemoryConnection::new();
        let observer = connection.clone();

        connection.write_slot("visits", "[]").unwrap();
        assert_eq!(observer.read_slot("visits").unwrap(), Some("[]".to_string()));
        assert_eq!(observer.slot_count().unwrap(), 1);

        assert!(observer.remove_slot("visits").unwrap());
        assert_eq!(connection.read_slot("visits").unwrap(), None);
        assert!(!connection.remove_slot("visits").unwrap());
    }
}
