mod handlers;
mod server;

use axum::{Router, routing::get};

use hubspot_integration_axum::{INTEGRATIONS_ROUTE_PREFIX, integrations_router};

use handlers::index;
use server::{init_tracing, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_hubspot");

    hubspot_integration_axum::init().await?;

    let app = Router::new()
        .route("/", get(index))
        .nest(INTEGRATIONS_ROUTE_PREFIX.as_str(), integrations_router());

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    spawn_http_server(port, app).await??;
    Ok(())
}
