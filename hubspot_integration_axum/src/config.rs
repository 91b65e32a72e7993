//! Configuration for the HTTP layer

use std::sync::LazyLock;

/// Origins allowed to call the integration routes from a browser
/// Default: "http://localhost:3000"
pub(super) static INTEGRATIONS_ALLOWED_ORIGINS: LazyLock<Vec<String>> = LazyLock::new(|| {
    parse_origins(std::env::var("INTEGRATIONS_ALLOWED_ORIGINS").ok().as_deref())
});

fn parse_origins(env_value: Option<&str>) -> Vec<String> {
    env_value
        .unwrap_or("http://localhost:3000")
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
