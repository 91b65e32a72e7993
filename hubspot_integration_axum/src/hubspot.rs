use askama::Template;
use axum::{
    Json, Router,
    extract::{
        Form, Query,
        rejection::{FormRejection, JsonRejection, QueryRejection},
    },
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;

use hubspot_integration::{
    CallbackParams, IntegrationItem, authorize_hubspot, get_hubspot_credentials,
    get_items_hubspot, oauth2callback_hubspot,
};

use super::error::{ErrorResponse, IntoResponseError};

pub(super) fn router() -> Router {
    Router::new()
        .route("/authorize", post(authorize))
        .route("/oauth2callback", get(oauth2callback))
        .route("/credentials", post(credentials))
        .route("/items", post(items))
}

#[derive(Debug, Deserialize)]
struct UserOrgForm {
    user_id: String,
    org_id: String,
}

#[derive(Debug, Deserialize)]
struct ItemsRequest {
    credentials: Value,
}

#[derive(Template)]
#[template(path = "popup_close.j2")]
struct PopupCloseTemplate<'a> {
    message: &'a str,
}

async fn authorize(
    form: Result<Form<UserOrgForm>, FormRejection>,
) -> Result<Json<String>, ErrorResponse> {
    let Form(form) = form.into_response_error()?;
    let auth_url = authorize_hubspot(&form.user_id, &form.org_id)
        .await
        .into_response_error()?;
    Ok(Json(auth_url))
}

/// Redirect target registered with HubSpot; closes the popup the flow runs in
async fn oauth2callback(
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> Result<Html<String>, ErrorResponse> {
    let Query(params) = params.into_response_error()?;
    oauth2callback_hubspot(&params).await.into_response_error()?;

    let template = PopupCloseTemplate {
        message: "HubSpot connected. You can close this window.",
    };
    Ok(Html(template.render().into_response_error()?))
}

async fn credentials(
    form: Result<Form<UserOrgForm>, FormRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let Form(form) = form.into_response_error()?;
    let credentials = get_hubspot_credentials(&form.user_id, &form.org_id)
        .await
        .into_response_error()?;
    Ok(Json(credentials))
}

async fn items(
    request: Result<Json<ItemsRequest>, JsonRejection>,
) -> Result<Json<Vec<IntegrationItem>>, ErrorResponse> {
    let Json(request) = request.into_response_error()?;
    let items = get_items_hubspot(request.credentials)
        .await
        .into_response_error()?;
    Ok(Json(items))
}
