//! Central configuration for the hubspot_integration crate

use std::sync::LazyLock;

/// Route prefix for all integration endpoints
///
/// Connector routers are mounted below this prefix, e.g. `/integrations/hubspot/...`.
/// Default: "/integrations"
pub static INTEGRATIONS_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("INTEGRATIONS_ROUTE_PREFIX").unwrap_or_else(|_| "/integrations".to_string())
});
