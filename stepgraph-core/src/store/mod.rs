use crate::types::StoreError;
use async_trait::async_trait;
use rand::seq::IteratorRandom;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

/// Ephemeral key-value lookups used by auxiliary step bodies and routers.
///
/// No transactional guarantees are implied.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Add `member` to the set at `set_key`. Returns false if it was already present.
    async fn add_member(&self, set_key: &str, member: String) -> Result<bool, StoreError>;

    /// A uniformly chosen member of the set at `set_key`
    async fn random_member(&self, set_key: &str) -> Result<Option<String>, StoreError>;
}

/// In-process [`KeyValueStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    sets: RwLock<HashMap<String, BTreeSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn add_member(&self, set_key: &str, member: String) -> Result<bool, StoreError> {
        Ok(self
            .sets
            .write()
            .await
            .entry(set_key.to_string())
            .or_default()
            .insert(member))
    }

    async fn random_member(&self, set_key: &str) -> Result<Option<String>, StoreError> {
        let sets = self.sets.read().await;
        Ok(sets
            .get(set_key)
            .and_then(|members| members.iter().choose(&mut rand::thread_rng()).cloned()))
    }
}
