use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::KvStore;
use crate::error::Error;

/// Process-local store, used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), Error> {
        self.entries.lock().await.insert(key.into(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[test]
fn memory_store_put_get_remove() {
    use serde_json::json;
    use tokio_test::block_on;

    let store = MemoryStore::new();

    block_on(store.put("locale", json!("es"))).unwrap();
    assert_eq!(block_on(store.get("locale")).unwrap(), Some(json!("es")));

    block_on(store.put("locale", json!("en"))).unwrap();
    assert_eq!(block_on(store.get("locale")).unwrap(), Some(json!("en")));

    block_on(store.remove("locale")).unwrap();
    assert_eq!(block_on(store.get("locale")).unwrap(), None);
}
