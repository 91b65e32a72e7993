//! hubspot_integration - HubSpot CRM connector for the integrations backend
//!
//! This crate drives the HubSpot OAuth2 authorization-code flow, keeps the
//! resulting token material in a short-lived cache keyed by organization and
//! user, and normalizes HubSpot CRM objects into [`IntegrationItem`] trees.

mod config;
mod hubspot;
mod integration_item;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::INTEGRATIONS_ROUTE_PREFIX;

pub use hubspot::{
    CallbackParams, HubSpotError, authorize_hubspot, get_hubspot_credentials, get_items_hubspot,
    oauth2callback_hubspot,
};

pub use integration_item::IntegrationItem;

/// Initialize the integration layer
///
/// Forces required configuration to load and connects the cache store so that
/// misconfiguration fails at startup rather than on the first request.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    hubspot::init().await?;
    Ok(())
}
