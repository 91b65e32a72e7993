use std::sync::Once;

/// Load `.env_test` once and initialize the integration library
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });

    if let Err(e) = hubspot_integration::init().await {
        eprintln!("Warning: Failed to initialize hubspot_integration: {e}");
    }
}
