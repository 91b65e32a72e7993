//! Combined router for all integration endpoints

use axum::Router;
use http::{HeaderValue, Method, header};
use tower_http::LatencyUnit;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::config::INTEGRATIONS_ALLOWED_ORIGINS;

/// Create a router for all integration endpoints
///
/// The endpoints will be available at:
/// - {INTEGRATIONS_ROUTE_PREFIX}/hubspot/authorize
/// - {INTEGRATIONS_ROUTE_PREFIX}/hubspot/oauth2callback
/// - {INTEGRATIONS_ROUTE_PREFIX}/hubspot/credentials
/// - {INTEGRATIONS_ROUTE_PREFIX}/hubspot/items
pub fn integrations_router() -> Router {
    integrations_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `integrations_router()` but without the HTTP tracing middleware.
pub fn integrations_router_no_trace() -> Router {
    Router::new()
        .nest("/hubspot", super::hubspot::router())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = INTEGRATIONS_ALLOWED_ORIGINS
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid allowed origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
