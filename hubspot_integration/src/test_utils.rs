//! Test utilities module for shared test initialization
//!
//! Loads `.env_test` once so that every `LazyLock` configuration value and the
//! generic cache store resolve to the in-memory test setup.

use std::sync::Once;

/// Centralized test initialization for all tests across the crate
///
/// ## Usage
/// ```rust,ignore
/// use crate::test_utils::init_test_environment;
///
/// #[tokio::test]
/// async fn my_test() {
///     init_test_environment().await;
///     // ... test code that touches the cache or HubSpot configuration
/// }
/// ```
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });

    if let Err(e) = crate::storage::init().await {
        eprintln!("Warning: Failed to initialize cache store: {e}");
    }
}
