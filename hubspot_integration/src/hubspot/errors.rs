use thiserror::Error;

use crate::storage::{CacheErrorConversion, StorageError};
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum HubSpotError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Decode state error: {0}")]
    DecodeState(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Missing authorization code")]
    MissingCode,

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("No credentials found")]
    CredentialsNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Fetch CRM objects error: {0}")]
    FetchObjects(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl CacheErrorConversion<HubSpotError> for HubSpotError {
    fn convert_storage_error(error: StorageError) -> HubSpotError {
        match error {
            StorageError::InvalidInput(msg) => HubSpotError::InvalidInput(msg),
            other => HubSpotError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message_is_verbatim() {
        let error = HubSpotError::InvalidState("Invalid state parameter".to_string());
        assert_eq!(error.to_string(), "Invalid state parameter");
    }

    #[test]
    fn test_credentials_not_found_message() {
        assert_eq!(
            HubSpotError::CredentialsNotFound.to_string(),
            "No credentials found"
        );
    }

    #[test]
    fn test_storage_invalid_input_maps_to_invalid_input() {
        let converted = HubSpotError::convert_storage_error(StorageError::InvalidInput(
            "Cache key contains whitespace or control characters".to_string(),
        ));
        assert!(matches!(converted, HubSpotError::InvalidInput(_)));
    }

    #[test]
    fn test_storage_failure_maps_to_storage() {
        let converted =
            HubSpotError::convert_storage_error(StorageError::Storage("down".to_string()));
        match converted {
            HubSpotError::Storage(msg) => assert_eq!(msg, "Storage error: down"),
            other => panic!("Expected Storage error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_util_error() {
        let error: HubSpotError = UtilError::Crypto("rng".to_string()).into();
        assert!(matches!(error, HubSpotError::Utils(UtilError::Crypto(_))));
    }
}
