//! hubspot_integration_axum - Axum routes for the HubSpot CRM connector
//!
//! Mount [`integrations_router`] under [`INTEGRATIONS_ROUTE_PREFIX`] after
//! calling [`init`].

mod config;
mod error;
mod hubspot;
mod router;

#[cfg(test)]
mod test_utils;

pub use router::{integrations_router, integrations_router_no_trace};

// Re-export the route prefix, initialization function and item type from hubspot_integration
pub use hubspot_integration::{INTEGRATIONS_ROUTE_PREFIX, IntegrationItem, init};
