use askama::Error as TemplateError;
use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use http::StatusCode;
use hubspot_integration::HubSpotError;
use serde::Serialize;

/// JSON body returned for failed requests
#[derive(Debug, Serialize)]
pub(super) struct ErrorDetail {
    pub(super) detail: String,
}

pub(super) type ErrorResponse = (StatusCode, Json<ErrorDetail>);

fn error_response(status: StatusCode, detail: String) -> ErrorResponse {
    (status, Json(ErrorDetail { detail }))
}

/// Helper trait for converting errors to a standard response error format
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ErrorResponse>;
}

impl<T> IntoResponseError<T> for Result<T, HubSpotError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            let status = match e {
                HubSpotError::InvalidInput(_)
                | HubSpotError::AuthorizationDenied(_)
                | HubSpotError::DecodeState(_)
                | HubSpotError::InvalidState(_)
                | HubSpotError::MissingCode
                | HubSpotError::CredentialsNotFound
                | HubSpotError::InvalidCredentials => StatusCode::BAD_REQUEST,
                HubSpotError::TokenExchange(_) | HubSpotError::FetchObjects(_) => {
                    StatusCode::BAD_GATEWAY
                }
                HubSpotError::Storage(_) | HubSpotError::Serde(_) | HubSpotError::Utils(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            if status.is_server_error() {
                tracing::error!("Request failed with {}: {}", status, e);
            } else {
                tracing::debug!("Request rejected with {}: {}", status, e);
            }
            error_response(status, e.to_string())
        })
    }
}

/// Template rendering failures
impl<T> IntoResponseError<T> for Result<T, TemplateError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

fn rejection_response(body_text: String) -> ErrorResponse {
    tracing::debug!("Malformed request: {}", body_text);
    error_response(StatusCode::BAD_REQUEST, body_text)
}

/// Form bodies that fail to deserialize, e.g. a missing `org_id`
impl<T> IntoResponseError<T> for Result<T, FormRejection> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|rejection| rejection_response(rejection.body_text()))
    }
}

impl<T> IntoResponseError<T> for Result<T, JsonRejection> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|rejection| rejection_response(rejection.body_text()))
    }
}

impl<T> IntoResponseError<T> for Result<T, QueryRejection> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|rejection| rejection_response(rejection.body_text()))
    }
}
