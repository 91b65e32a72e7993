use askama::Template;
use axum::response::Html;
use http::StatusCode;
use hubspot_integration_axum::INTEGRATIONS_ROUTE_PREFIX;

#[derive(Template)]
#[template(path = "index.j2")]
struct IndexTemplate<'a> {
    integrations_route_prefix: &'a str,
}

pub(crate) async fn index() -> Result<Html<String>, (StatusCode, String)> {
    let template = IndexTemplate {
        integrations_route_prefix: INTEGRATIONS_ROUTE_PREFIX.as_str(),
    };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}
