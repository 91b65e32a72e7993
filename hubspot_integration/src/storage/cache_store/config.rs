use std::env;
use tokio::sync::{Mutex, OnceCell};

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};

pub(crate) type SharedCacheStore = Mutex<Box<dyn CacheStore>>;

static GENERIC_CACHE_STORE: OnceCell<SharedCacheStore> = OnceCell::const_new();

/// Backend named by `GENERIC_CACHE_STORE_TYPE`
#[derive(Debug)]
enum CacheBackend {
    Memory,
    Redis { url: String },
}

impl CacheBackend {
    fn from_env() -> Result<Self, StorageError> {
        Self::from_settings(
            env::var("GENERIC_CACHE_STORE_TYPE").ok().as_deref(),
            env::var("GENERIC_CACHE_STORE_URL").ok().as_deref(),
        )
    }

    fn from_settings(
        store_type: Option<&str>,
        store_url: Option<&str>,
    ) -> Result<Self, StorageError> {
        match store_type.map(str::trim) {
            Some("memory") => Ok(Self::Memory),
            Some("redis") => store_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(|url| Self::Redis {
                    url: url.to_string(),
                })
                .ok_or_else(|| {
                    StorageError::Config(
                        "GENERIC_CACHE_STORE_URL must be set for the redis cache store".to_string(),
                    )
                }),
            Some(other) => Err(StorageError::Config(format!(
                "Unsupported cache store type: {other}. Supported types are 'memory' and 'redis'"
            ))),
            None => Err(StorageError::Config(
                "GENERIC_CACHE_STORE_TYPE must be set".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis { .. } => "redis",
        }
    }

    async fn connect(self) -> Result<Box<dyn CacheStore>, StorageError> {
        match self {
            Self::Memory => Ok(Box::new(InMemoryCacheStore::new())),
            Self::Redis { url } => {
                let store = RedisCacheStore {
                    client: redis::Client::open(url.as_str())?,
                };
                store.init().await?;
                Ok(Box::new(store))
            }
        }
    }
}

/// Process-wide cache store, connected on first use
///
/// A misconfigured or unreachable backend is reported as an error on every
/// call until it succeeds; nothing is cached for a failed attempt.
pub(crate) async fn generic_cache_store() -> Result<&'static SharedCacheStore, StorageError> {
    GENERIC_CACHE_STORE
        .get_or_try_init(|| async {
            let backend = CacheBackend::from_env()?;
            let name = backend.name();
            let store = backend.connect().await.inspect_err(|e| {
                tracing::error!("Failed to initialize {} cache store: {}", name, e);
            })?;
            tracing::info!("Connected to {} cache store", name);
            Ok::<_, StorageError>(Mutex::new(store))
        })
        .await
}
