use serde_json::Value;

use crate::hubspot::config::{
    HUBSPOT_API_BASE_URL, HUBSPOT_CLIENT_ID, HUBSPOT_CLIENT_SECRET, HUBSPOT_MAX_PAGES,
    HUBSPOT_PAGE_LIMIT, HUBSPOT_REDIRECT_URI, HUBSPOT_TOKEN_URL,
};
use crate::hubspot::errors::HubSpotError;
use crate::hubspot::types::{CrmObject, CrmObjectKind, CrmObjectPage, HubSpotCredentials};

use super::utils::get_client;

/// Exchange an authorization code for HubSpot token material.
///
/// Returns the token endpoint's JSON body unchanged once it is known to carry
/// an `access_token`.
pub(super) async fn exchange_code_for_token(code: &str) -> Result<Value, HubSpotError> {
    let client = get_client().map_err(|e| HubSpotError::TokenExchange(e.to_string()))?;
    let response = client
        .post(HUBSPOT_TOKEN_URL.as_str())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", HUBSPOT_CLIENT_ID.as_str()),
            ("client_secret", HUBSPOT_CLIENT_SECRET.as_str()),
            ("redirect_uri", HUBSPOT_REDIRECT_URI.as_str()),
            ("code", code),
        ])
        .send()
        .await
        .map_err(|e| HubSpotError::TokenExchange(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| HubSpotError::TokenExchange(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("Token exchange failed: {} {}", status, response_body);
        return Err(HubSpotError::TokenExchange(status.to_string()));
    }

    let token_json: Value = serde_json::from_str(&response_body)
        .map_err(|e| HubSpotError::TokenExchange(e.to_string()))?;

    HubSpotCredentials::from_value(token_json.clone()).map_err(|_| {
        HubSpotError::TokenExchange("access_token not present in response".to_string())
    })?;

    tracing::debug!("Token exchange succeeded");
    Ok(token_json)
}

/// Fetch every page of one CRM collection, up to `HUBSPOT_MAX_PAGES`.
///
/// Returns `Ok(None)` when HubSpot answers with a non-success status; the
/// collection is then left out of the item tree.
pub(super) async fn fetch_crm_objects(
    client: &reqwest::Client,
    kind: CrmObjectKind,
    access_token: &str,
) -> Result<Option<Vec<CrmObject>>, HubSpotError> {
    let url = format!(
        "{}/crm/v3/objects/{}",
        HUBSPOT_API_BASE_URL.as_str(),
        kind.path()
    );
    let limit = HUBSPOT_PAGE_LIMIT.to_string();
    let properties = kind.properties().join(",");

    let mut objects = Vec::new();
    let mut after: Option<String> = None;

    for page_number in 1..=*HUBSPOT_MAX_PAGES {
        let mut query = vec![("limit", limit.as_str()), ("properties", properties.as_str())];
        if let Some(cursor) = after.as_deref() {
            query.push(("after", cursor));
        }

        let response = client
            .get(&url)
            .bearer_auth(access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| HubSpotError::FetchObjects(format!("{}: {e}", kind.path())))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "Skipping HubSpot {}: page {} returned {}",
                kind.path(),
                page_number,
                status
            );
            return Ok(None);
        }

        let page: CrmObjectPage = response
            .json()
            .await
            .map_err(|e| HubSpotError::FetchObjects(format!("{}: {e}", kind.path())))?;

        tracing::debug!(
            "Fetched {} {} on page {}",
            page.results.len(),
            kind.path(),
            page_number
        );

        after = page.next_after().map(str::to_string);
        objects.extend(page.results);

        if after.is_none() {
            return Ok(Some(objects));
        }
    }

    tracing::info!(
        "Stopped paging HubSpot {} after {} pages",
        kind.path(),
        *HUBSPOT_MAX_PAGES
    );
    Ok(Some(objects))
}
