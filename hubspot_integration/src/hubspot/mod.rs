mod config;
mod errors;
mod main;
mod types;

pub use errors::HubSpotError;
pub use main::{
    authorize_hubspot, get_hubspot_credentials, get_items_hubspot, oauth2callback_hubspot,
};
pub use types::CallbackParams;

use config::{HUBSPOT_CLIENT_ID, HUBSPOT_CLIENT_SECRET, HUBSPOT_REDIRECT_URI};

pub(crate) async fn init() -> Result<(), HubSpotError> {
    let _ = *HUBSPOT_CLIENT_ID;
    let _ = *HUBSPOT_CLIENT_SECRET;
    let _ = *HUBSPOT_REDIRECT_URI;
    tracing::info!(
        "HubSpot integration ready (redirect_uri: {})",
        HUBSPOT_REDIRECT_URI.as_str()
    );
    Ok(())
}
