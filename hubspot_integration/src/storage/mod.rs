mod cache_operations;
mod cache_store;
mod errors;
mod types;

pub(crate) async fn init() -> Result<(), errors::StorageError> {
    cache_store::generic_cache_store().await?;

    Ok(())
}

pub(crate) use cache_operations::{
    CacheErrorConversion, get_data, remove_data, store_data, take_data,
};
pub(crate) use errors::StorageError;
pub(crate) use types::{CacheData, CacheKey, CachePrefix};
