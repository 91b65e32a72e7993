use serde_json::Value;
use subtle::ConstantTimeEq;
use url::Url;

use crate::hubspot::config::{
    HUBSPOT_AUTH_URL, HUBSPOT_CLIENT_ID, HUBSPOT_CREDENTIALS_TTL, HUBSPOT_REDIRECT_URI,
    HUBSPOT_SCOPES, HUBSPOT_STATE_TTL,
};
use crate::hubspot::errors::HubSpotError;
use crate::hubspot::types::{
    CallbackParams, CrmObjectKind, HubSpotCredentials, StateParams, StoredCredentials,
};
use crate::integration_item::IntegrationItem;
use crate::storage::{
    CacheErrorConversion, CacheKey, CachePrefix, get_data, remove_data, store_data, take_data,
};
use crate::utils::gen_random_string;

use super::client::{exchange_code_for_token, fetch_crm_objects};
use super::items::build_integration_items;
use super::utils::{decode_state, encode_state, get_client};

fn cache_key(org_id: &str, user_id: &str) -> Result<CacheKey, HubSpotError> {
    CacheKey::for_org_user(org_id, user_id).map_err(HubSpotError::convert_storage_error)
}

/// Start the HubSpot authorization for a user of an organization.
///
/// Stores a fresh random state for `(org_id, user_id)`, replacing any pending
/// one, and returns the HubSpot URL the user's browser should open.
pub async fn authorize_hubspot(user_id: &str, org_id: &str) -> Result<String, HubSpotError> {
    let key = cache_key(org_id, user_id)?;

    let state_params = StateParams {
        state: gen_random_string(32)?,
        user_id: user_id.to_string(),
        org_id: org_id.to_string(),
    };
    let encoded_state = encode_state(&state_params)?;

    store_data(
        CachePrefix::hubspot_state(),
        key,
        state_params,
        *HUBSPOT_STATE_TTL,
    )
    .await?;

    let mut auth_url = Url::parse(HUBSPOT_AUTH_URL.as_str())
        .map_err(|e| HubSpotError::InvalidInput(format!("Invalid HUBSPOT_AUTH_URL: {e}")))?;
    auth_url
        .query_pairs_mut()
        .append_pair("client_id", HUBSPOT_CLIENT_ID.as_str())
        .append_pair("scope", HUBSPOT_SCOPES.as_str())
        .append_pair("redirect_uri", HUBSPOT_REDIRECT_URI.as_str())
        .append_pair("state", &encoded_state);

    tracing::info!("Authorization started for org {} user {}", org_id, user_id);
    Ok(auth_url.into())
}

/// Complete the authorization with the parameters HubSpot redirected back with.
///
/// On success the token response is cached for `(org_id, user_id)` until it is
/// fetched with [`get_hubspot_credentials`] or expires.
pub async fn oauth2callback_hubspot(params: &CallbackParams) -> Result<(), HubSpotError> {
    if let Some(error) = params.error.as_deref() {
        let reason = params.error_description.as_deref().unwrap_or(error);
        tracing::error!("HubSpot authorization denied: {}", reason);
        return Err(HubSpotError::AuthorizationDenied(reason.to_string()));
    }

    let encoded_state = params
        .state
        .as_deref()
        .ok_or_else(|| HubSpotError::DecodeState("Missing state parameter".to_string()))?;
    let state_params = decode_state(encoded_state)?;
    tracing::debug!(
        "Callback for org {} user {}",
        state_params.org_id,
        state_params.user_id
    );

    let key = cache_key(&state_params.org_id, &state_params.user_id)?;

    let saved_state: Option<StateParams> =
        get_data(CachePrefix::hubspot_state(), key.clone()).await?;
    let saved_state = saved_state.ok_or_else(|| {
        tracing::error!("No pending state for the callback");
        HubSpotError::InvalidState("Invalid state parameter".to_string())
    })?;

    if !bool::from(
        saved_state
            .state
            .as_bytes()
            .ct_eq(state_params.state.as_bytes()),
    ) {
        tracing::error!("Callback state does not match the pending state");
        return Err(HubSpotError::InvalidState(
            "Invalid state parameter".to_string(),
        ));
    }

    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(HubSpotError::MissingCode)?;

    remove_data::<HubSpotError>(CachePrefix::hubspot_state(), key.clone()).await?;

    let token_json = exchange_code_for_token(code).await?;

    store_data(
        CachePrefix::hubspot_credentials(),
        key,
        StoredCredentials(token_json),
        *HUBSPOT_CREDENTIALS_TTL,
    )
    .await?;

    tracing::info!(
        "Stored HubSpot credentials for org {} user {}",
        state_params.org_id,
        state_params.user_id
    );
    Ok(())
}

/// Hand over the credentials stored by the callback.
///
/// The entry is deleted as it is read, so a second call fails with
/// [`HubSpotError::CredentialsNotFound`].
pub async fn get_hubspot_credentials(user_id: &str, org_id: &str) -> Result<Value, HubSpotError> {
    let key = cache_key(org_id, user_id)?;

    let credentials: Option<StoredCredentials> =
        take_data(CachePrefix::hubspot_credentials(), key).await?;

    match credentials {
        Some(StoredCredentials(value)) => {
            tracing::debug!("Credentials handed over for org {} user {}", org_id, user_id);
            Ok(value)
        }
        None => Err(HubSpotError::CredentialsNotFound),
    }
}

/// Load contacts, companies and deals and flatten them into integration items.
pub async fn get_items_hubspot(credentials: Value) -> Result<Vec<IntegrationItem>, HubSpotError> {
    let credentials = HubSpotCredentials::from_value(credentials)?;
    tracing::debug!(
        "Fetching CRM objects (token_type: {:?}, expires_in: {:?}, refresh_token: {})",
        credentials.token_type,
        credentials.expires_in,
        credentials.refresh_token.is_some()
    );

    let client = get_client()?;
    let token = credentials.access_token.as_str();

    let (contacts, companies, deals) = tokio::join!(
        fetch_crm_objects(&client, CrmObjectKind::Contacts, token),
        fetch_crm_objects(&client, CrmObjectKind::Companies, token),
        fetch_crm_objects(&client, CrmObjectKind::Deals, token),
    );

    let mut sections = Vec::with_capacity(CrmObjectKind::ALL.len());
    for (kind, result) in CrmObjectKind::ALL
        .into_iter()
        .zip([contacts, companies, deals])
    {
        if let Some(objects) = result? {
            sections.push((kind, objects));
        }
    }

    let items = build_integration_items(sections);
    tracing::info!("Built {} HubSpot integration items", items.len());
    Ok(items)
}
