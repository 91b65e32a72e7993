use std::{env, sync::LazyLock};

use crate::config::INTEGRATIONS_ROUTE_PREFIX;

pub(super) static HUBSPOT_CLIENT_ID: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_CLIENT_ID").expect("HUBSPOT_CLIENT_ID must be set")
});

pub(super) static HUBSPOT_CLIENT_SECRET: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_CLIENT_SECRET").expect("HUBSPOT_CLIENT_SECRET must be set")
});

/// Callback URL registered with the HubSpot app.
///
/// Falls back to `{ORIGIN}{INTEGRATIONS_ROUTE_PREFIX}/hubspot/oauth2callback`.
pub(super) static HUBSPOT_REDIRECT_URI: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_REDIRECT_URI").unwrap_or_else(|_| {
        format!(
            "{}{}/hubspot/oauth2callback",
            env::var("ORIGIN").expect("Missing HUBSPOT_REDIRECT_URI or ORIGIN!"),
            INTEGRATIONS_ROUTE_PREFIX.as_str()
        )
    })
});

pub(super) static HUBSPOT_SCOPES: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_SCOPES").unwrap_or_else(|_| {
        "crm.objects.contacts.read crm.objects.companies.read crm.objects.deals.read".to_string()
    })
});

pub(super) static HUBSPOT_AUTH_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_AUTH_URL")
        .unwrap_or_else(|_| "https://app.hubspot.com/oauth/authorize".to_string())
});

pub(super) static HUBSPOT_TOKEN_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_TOKEN_URL")
        .unwrap_or_else(|_| "https://api.hubapi.com/oauth/v1/token".to_string())
});

pub(super) static HUBSPOT_API_BASE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("HUBSPOT_API_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "https://api.hubapi.com".to_string())
});

/// Seconds a pending authorization state stays valid
pub(super) static HUBSPOT_STATE_TTL: LazyLock<u64> =
    LazyLock::new(|| parse_ttl_env("HUBSPOT_STATE_TTL", 600));

/// Seconds exchanged credentials stay retrievable
pub(super) static HUBSPOT_CREDENTIALS_TTL: LazyLock<u64> =
    LazyLock::new(|| parse_ttl_env("HUBSPOT_CREDENTIALS_TTL", 600));

/// Key used to sign the state blob handed to HubSpot
pub(super) static HUBSPOT_STATE_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| match env::var("HUBSPOT_STATE_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => {
            tracing::warn!("HUBSPOT_STATE_SECRET not set; using the development default");
            "default_state_secret_change_in_production"
                .to_string()
                .into_bytes()
        }
    });

/// `limit` query parameter for each CRM object page
pub(super) static HUBSPOT_PAGE_LIMIT: LazyLock<u64> =
    LazyLock::new(|| parse_u64_env("HUBSPOT_PAGE_LIMIT", 100));

/// Upper bound on cursor pages followed per collection
pub(super) static HUBSPOT_MAX_PAGES: LazyLock<u64> =
    LazyLock::new(|| parse_u64_env("HUBSPOT_MAX_PAGES", 10).max(1));

fn parse_u64_env(name: &str, default: u64) -> u64 {
    parse_u64_or(env::var(name).ok().as_deref(), default)
}

/// TTLs below one second are raised to one; cache entries always expire.
fn parse_ttl_env(name: &str, default: u64) -> u64 {
    parse_ttl_or(env::var(name).ok().as_deref(), default)
}

fn parse_ttl_or(value: Option<&str>, default: u64) -> u64 {
    let ttl = parse_u64_or(value, default);
    if ttl == 0 {
        tracing::warn!("TTL of 0 seconds is not supported; using 1");
    }
    ttl.max(1)
}

fn parse_u64_or(value: Option<&str>, default: u64) -> u64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}
