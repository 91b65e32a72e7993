mod config;
mod memory;
mod redis;
mod types;

pub(crate) use config::{SharedCacheStore, generic_cache_store};
