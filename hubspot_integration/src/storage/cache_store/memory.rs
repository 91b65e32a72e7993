use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::storage::errors::StorageError;
use crate::storage::types::{CacheData, CacheKey, CachePrefix};

use super::types::{CacheStore, InMemoryCacheStore, MemoryEntry};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn make_key(prefix: &CachePrefix, key: &CacheKey) -> String {
        format!("{CACHE_PREFIX}:{}:{}", prefix.as_str(), key.as_str())
    }

    fn is_live(entry: &MemoryEntry) -> bool {
        entry.expires_at.is_none_or(|expires_at| Utc::now() < expires_at)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn put(
        &mut self,
        prefix: CachePrefix,
        key: CacheKey,
        value: CacheData,
    ) -> Result<(), StorageError> {
        let key = Self::make_key(&prefix, &key);
        self.entry.insert(
            key,
            MemoryEntry {
                data: value,
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: CachePrefix,
        key: CacheKey,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let ttl = i64::try_from(ttl)
            .map_err(|_| StorageError::InvalidInput("TTL value too large".to_string()))?;
        let key = Self::make_key(&prefix, &key);

        // Drop anything that has already expired while we hold the lock
        self.entry.retain(|_, entry| Self::is_live(entry));

        self.entry.insert(
            key,
            MemoryEntry {
                data: value,
                expires_at: Some(Utc::now() + Duration::seconds(ttl)),
            },
        );
        Ok(())
    }

    async fn get(
        &self,
        prefix: CachePrefix,
        key: CacheKey,
    ) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(&prefix, &key);
        Ok(self
            .entry
            .get(&key)
            .filter(|entry| Self::is_live(entry))
            .map(|entry| entry.data.clone()))
    }

    async fn remove(&mut self, prefix: CachePrefix, key: CacheKey) -> Result<(), StorageError> {
        let key = Self::make_key(&prefix, &key);
        self.entry.remove(&key);
        Ok(())
    }

    async fn take(
        &mut self,
        prefix: CachePrefix,
        key: CacheKey,
    ) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(&prefix, &key);
        Ok(self
            .entry
            .remove(&key)
            .filter(Self::is_live)
            .map(|entry| entry.data))
    }
}
