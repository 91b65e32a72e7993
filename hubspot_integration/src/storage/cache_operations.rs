use super::cache_store::{SharedCacheStore, generic_cache_store};
use super::errors::StorageError;
use super::types::{CacheData, CacheKey, CachePrefix};

/// Trait for converting storage errors to module-specific error types
pub(crate) trait CacheErrorConversion<E> {
    fn convert_storage_error(error: StorageError) -> E;
}

async fn shared_store<E>() -> Result<&'static SharedCacheStore, E>
where
    E: CacheErrorConversion<E>,
{
    generic_cache_store()
        .await
        .map_err(E::convert_storage_error)
}

/// Store data under a typed prefix and key with a TTL in seconds.
///
/// An existing entry under the same prefix and key is replaced (last write wins).
/// A TTL of zero is rejected, since redis refuses `SET EX 0`.
pub(crate) async fn store_data<T, E>(
    prefix: CachePrefix,
    key: CacheKey,
    data: T,
    ttl: u64,
) -> Result<(), E>
where
    T: TryInto<CacheData, Error = E>,
    E: CacheErrorConversion<E>,
{
    if ttl == 0 {
        return Err(E::convert_storage_error(StorageError::InvalidInput(
            "TTL must be at least one second".to_string(),
        )));
    }
    let cache_data = data.try_into()?;
    let ttl_usize = ttl.try_into().map_err(|_| {
        E::convert_storage_error(StorageError::InvalidInput(
            "TTL value too large for storage backend".to_string(),
        ))
    })?;

    tracing::debug!("Storing cache entry {}:{} (ttl {}s)", prefix, key, ttl);

    shared_store::<E>()
        .await?
        .lock()
        .await
        .put_with_ttl(prefix, key, cache_data, ttl_usize)
        .await
        .map_err(E::convert_storage_error)
}

/// Retrieve data from cache
///
/// Returns `Ok(None)` when the entry is missing or expired.
pub(crate) async fn get_data<T, E>(prefix: CachePrefix, key: CacheKey) -> Result<Option<T>, E>
where
    T: TryFrom<CacheData, Error = E>,
    E: CacheErrorConversion<E>,
{
    match shared_store::<E>()
        .await?
        .lock()
        .await
        .get(prefix, key)
        .await
        .map_err(E::convert_storage_error)?
    {
        Some(cache_data) => Ok(Some(T::try_from(cache_data)?)),
        None => Ok(None),
    }
}

/// Retrieve data from cache and delete it in the same step
pub(crate) async fn take_data<T, E>(prefix: CachePrefix, key: CacheKey) -> Result<Option<T>, E>
where
    T: TryFrom<CacheData, Error = E>,
    E: CacheErrorConversion<E>,
{
    match shared_store::<E>()
        .await?
        .lock()
        .await
        .take(prefix, key)
        .await
        .map_err(E::convert_storage_error)?
    {
        Some(cache_data) => Ok(Some(T::try_from(cache_data)?)),
        None => Ok(None),
    }
}

/// Remove data from cache
pub(crate) async fn remove_data<E>(prefix: CachePrefix, key: CacheKey) -> Result<(), E>
where
    E: CacheErrorConversion<E>,
{
    shared_store::<E>()
        .await?
        .lock()
        .await
        .remove(prefix, key)
        .await
        .map_err(E::convert_storage_error)
}
