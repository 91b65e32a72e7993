pub mod mock_hubspot;

use std::sync::Once;

pub use mock_hubspot::{MockHubSpot, mock_hubspot};

/// Load `.env_test`, start the mock HubSpot server and initialize the library
pub async fn setup() -> &'static MockHubSpot {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        dotenvy::from_filename(".env_test").expect("Failed to load .env_test");
    });

    let server = mock_hubspot();
    hubspot_integration::init()
        .await
        .expect("Failed to initialize hubspot_integration");
    server
}
