//! In-memory store backing tests and offline runs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::object_store::{ObjectStore, StoreError};

#[derive(Debug, Default)]
pub struct MemStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), Vec<u8>>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectStore for MemStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.objects()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn head(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .objects()
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.objects()
            .insert((bucket.to_string(), key.to_string()), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_put_head() {
        let store = MemStore::new();
        assert!(!store.head("b", "k").unwrap());
        assert!(matches!(
            store.get("b", "k"),
            Err(StoreError::NotFound { .. })
        ));

        store.put("b", "k", b"data").unwrap();
        assert!(store.head("b", "k").unwrap());
        assert_eq!(store.get("b", "k").unwrap(), b"data");

        store.put("b", "k", b"newer").unwrap();
        assert_eq!(store.get("b", "k").unwrap(), b"newer");
    }
}
