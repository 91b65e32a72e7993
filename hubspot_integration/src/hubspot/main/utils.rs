use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;
use subtle::ConstantTimeEq;

use crate::hubspot::config::HUBSPOT_STATE_SECRET;
use crate::hubspot::errors::HubSpotError;
use crate::hubspot::types::StateParams;
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

fn sign(payload: &[u8], secret: &[u8]) -> Result<Vec<u8>, HubSpotError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| HubSpotError::InvalidInput(format!("Invalid state secret: {e}")))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Encode state as `base64url(json).base64url(hmac_sha256(json))`
pub(super) fn encode_state(state_params: &StateParams) -> Result<String, HubSpotError> {
    encode_state_with_secret(state_params, &HUBSPOT_STATE_SECRET)
}

pub(super) fn decode_state(state: &str) -> Result<StateParams, HubSpotError> {
    decode_state_with_secret(state, &HUBSPOT_STATE_SECRET)
}

fn encode_state_with_secret(
    state_params: &StateParams,
    secret: &[u8],
) -> Result<String, HubSpotError> {
    let state_json =
        serde_json::to_vec(state_params).map_err(|e| HubSpotError::Serde(e.to_string()))?;
    let signature = sign(&state_json, secret)?;
    Ok(format!(
        "{}.{}",
        base64url_encode(&state_json),
        base64url_encode(&signature)
    ))
}

fn decode_state_with_secret(state: &str, secret: &[u8]) -> Result<StateParams, HubSpotError> {
    let (payload, signature) = state
        .split_once('.')
        .ok_or_else(|| HubSpotError::DecodeState("Missing state signature".to_string()))?;

    let payload = base64url_decode(payload)
        .map_err(|e| HubSpotError::DecodeState(format!("Failed to decode payload: {e}")))?;
    let signature = base64url_decode(signature)
        .map_err(|e| HubSpotError::DecodeState(format!("Failed to decode signature: {e}")))?;

    let expected = sign(&payload, secret)?;
    if !bool::from(expected.as_slice().ct_eq(signature.as_slice())) {
        tracing::error!("State signature mismatch");
        return Err(HubSpotError::InvalidState(
            "Invalid state parameter".to_string(),
        ));
    }

    serde_json::from_slice(&payload)
        .map_err(|e| HubSpotError::DecodeState(format!("Failed to parse state: {e}")))
}

/// Creates a configured HTTP client for HubSpot calls.
///
/// - `timeout`: 30 seconds, so a stalled HubSpot request cannot hold a handler forever.
/// - `pool_idle_timeout`: 90 seconds before idle connections are dropped.
/// - `pool_max_idle_per_host`: 32 idle connections, enough for the concurrent CRM fetches.
pub(super) fn get_client() -> Result<reqwest::Client, HubSpotError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| HubSpotError::FetchObjects(format!("Failed to create HTTP client: {e}")))
}
