use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::StorageError;

const MAX_CACHE_COMPONENT_LEN: usize = 256;

/// Data stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CacheData {
    pub(crate) value: String,
}

/// Validated cache namespace, e.g. `hubspot_state`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CachePrefix(String);

/// Validated cache key within a prefix, e.g. `{org_id}:{user_id}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey(String);

fn validate_component(kind: &str, value: &str) -> Result<(), StorageError> {
    if value.is_empty() {
        return Err(StorageError::InvalidInput(format!("{kind} cannot be empty")));
    }
    if value.len() > MAX_CACHE_COMPONENT_LEN {
        return Err(StorageError::InvalidInput(format!(
            "{kind} exceeds {MAX_CACHE_COMPONENT_LEN} bytes"
        )));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(StorageError::InvalidInput(format!(
            "{kind} contains whitespace or control characters"
        )));
    }
    Ok(())
}

impl CachePrefix {
    #[allow(dead_code)] // Used in tests
    pub(crate) fn new(prefix: String) -> Result<Self, StorageError> {
        validate_component("Cache prefix", &prefix)?;
        if prefix.contains(':') {
            return Err(StorageError::InvalidInput(
                "Cache prefix cannot contain ':'".to_string(),
            ));
        }
        Ok(Self(prefix))
    }

    /// Pending OAuth2 state awaiting the HubSpot callback
    pub(crate) fn hubspot_state() -> Self {
        Self("hubspot_state".to_string())
    }

    /// Token material obtained from the HubSpot token endpoint
    pub(crate) fn hubspot_credentials() -> Self {
        Self("hubspot_credentials".to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl CacheKey {
    pub(crate) fn new(key: String) -> Result<Self, StorageError> {
        validate_component("Cache key", &key)?;
        Ok(Self(key))
    }

    /// Key scoped to one user of one organization
    ///
    /// `org_id` may not contain `:`, so the first separator always ends the
    /// organization and no two pairs share a key.
    pub(crate) fn for_org_user(org_id: &str, user_id: &str) -> Result<Self, StorageError> {
        if org_id.contains(':') {
            return Err(StorageError::InvalidInput(
                "Organization id cannot contain ':'".to_string(),
            ));
        }
        Self::new(format!("{org_id}:{user_id}"))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CachePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
