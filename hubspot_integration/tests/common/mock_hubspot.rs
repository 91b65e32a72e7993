//! Axum-based mock of the HubSpot OAuth and CRM endpoints
//!
//! A single server runs on a fixed port for the whole test binary, matching the
//! URLs configured in `.env_test`.

use axum::{
    Router,
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, LazyLock, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    thread,
    time::Duration,
};

pub const MOCK_HUBSPOT_PORT: u16 = 9877;

/// Code the token endpoint always rejects
pub const REJECTED_CODE: &str = "rejected-code";
/// Code the token endpoint accepts but answers without an access token
pub const TOKENLESS_CODE: &str = "tokenless-code";

/// Access token for which the deals endpoint answers 403
pub const DEALS_FORBIDDEN_TOKEN: &str = "access-deals-forbidden";
/// Access token for which the companies endpoint returns an undecodable body
pub const BROKEN_COMPANIES_TOKEN: &str = "access-broken-companies";

pub const CONTACT_COUNT: usize = 3;
pub const COMPANY_COUNT: usize = 1;
pub const DEAL_COUNT: usize = 7;

/// Shared state for the mock server
#[derive(Clone, Default)]
pub struct MockHubSpotState {
    next_code: Arc<AtomicU64>,
    issued_codes: Arc<Mutex<HashSet<String>>>,
    /// Form bodies received by the token endpoint
    pub token_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    /// Query strings received by the CRM endpoints, keyed by object type
    pub crm_requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

pub struct MockHubSpot {
    pub state: MockHubSpotState,
    _thread_handle: thread::JoinHandle<()>,
}

static MOCK_HUBSPOT: LazyLock<MockHubSpot> = LazyLock::new(|| {
    let state = MockHubSpotState::default();
    let server_state = state.clone();

    let thread_handle = thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", MOCK_HUBSPOT_PORT))
                .await
                .expect("Failed to bind mock HubSpot port");
            axum::serve(listener, create_mock_app(server_state))
                .await
                .expect("Mock HubSpot server failed");
        });
    });

    wait_for_server_ready();

    MockHubSpot {
        state,
        _thread_handle: thread_handle,
    }
});

/// Start the mock server on first use and return it
pub fn mock_hubspot() -> &'static MockHubSpot {
    &MOCK_HUBSPOT
}

fn wait_for_server_ready() {
    for _ in 0..50 {
        if std::net::TcpStream::connect(("127.0.0.1", MOCK_HUBSPOT_PORT)).is_ok() {
            return;
        }
        thread::sleep(Duration::from_millis(100));
    }
    panic!("Mock HubSpot server failed to start within timeout");
}

fn create_mock_app(state: MockHubSpotState) -> Router {
    Router::new()
        .route("/oauth/authorize", get(authorize))
        .route("/oauth/v1/token", post(token))
        .route("/crm/v3/objects/{object_type}", get(crm_objects))
        .with_state(state)
}

/// Consent screen stand-in: approves immediately and redirects back with a code
async fn authorize(
    State(state): State<MockHubSpotState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (Some(redirect_uri), Some(oauth_state)) = (params.get("redirect_uri"), params.get("state"))
    else {
        return (StatusCode::BAD_REQUEST, "missing redirect_uri or state").into_response();
    };

    let code = format!("code-{}", state.next_code.fetch_add(1, Ordering::SeqCst));
    state.issued_codes.lock().unwrap().insert(code.clone());

    let mut location = url::Url::parse(redirect_uri).unwrap();
    location
        .query_pairs_mut()
        .append_pair("code", &code)
        .append_pair("state", oauth_state);

    Redirect::to(location.as_str()).into_response()
}

async fn token(
    State(state): State<MockHubSpotState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_requests.lock().unwrap().push(form.clone());

    let field = |name: &str| form.get(name).map(String::as_str);
    if field("grant_type") != Some("authorization_code")
        || field("client_id") != Some("test-client-id")
        || field("client_secret") != Some("test-client-secret")
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "BAD_CLIENT_ID", "message": "invalid client"})),
        )
            .into_response();
    }

    match field("code") {
        Some(TOKENLESS_CODE) => Json(json!({"token_type": "bearer"})).into_response(),
        Some(code) if code != REJECTED_CODE && state.issued_codes.lock().unwrap().remove(code) => {
            Json(json!({
                "access_token": format!("access-{code}"),
                "refresh_token": format!("refresh-{code}"),
                "expires_in": 1800,
                "token_type": "bearer"
            }))
            .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "BAD_AUTH_CODE", "message": "missing or unknown auth code"})),
        )
            .into_response(),
    }
}

async fn crm_objects(
    State(state): State<MockHubSpotState>,
    Path(object_type): Path<String>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state
        .crm_requests
        .lock()
        .unwrap()
        .push((object_type.clone(), params.clone()));

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let Some(token) = token.filter(|t| t.starts_with("access-")) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"status": "error", "category": "INVALID_AUTHENTICATION"})),
        )
            .into_response();
    };

    if token == DEALS_FORBIDDEN_TOKEN && object_type == "deals" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"status": "error", "category": "MISSING_SCOPES"})),
        )
            .into_response();
    }
    if token == BROKEN_COMPANIES_TOKEN && object_type == "companies" {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    let Some(objects) = fixtures(&object_type) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(10);
    let offset: usize = params
        .get("after")
        .and_then(|a| a.parse().ok())
        .unwrap_or(0);
    let end = (offset + limit).min(objects.len());

    let mut body = json!({ "results": objects[offset.min(end)..end].to_vec() });
    if end < objects.len() {
        body["paging"] = json!({
            "next": {
                "after": end.to_string(),
                "link": format!("http://127.0.0.1:{MOCK_HUBSPOT_PORT}/crm/v3/objects/{object_type}?after={end}")
            }
        });
    }

    Json(body).into_response()
}

fn fixtures(object_type: &str) -> Option<Vec<Value>> {
    let created = "2024-01-15T09:30:00.000Z";
    let updated = "2024-02-20T17:45:10.500Z";
    let objects = match object_type {
        "contacts" => vec![
            json!({"id": "1", "properties": {"firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com"}}),
            json!({"id": "2", "properties": {"firstname": null, "lastname": "", "email": "grace@example.com"}}),
            json!({"id": "3", "properties": {}}),
        ],
        "companies" => vec![json!({"id": "10", "properties": {"name": "Acme Corp", "domain": "acme.test"}})],
        "deals" => (0..DEAL_COUNT)
            .map(|i| json!({"id": (100 + i).to_string(), "properties": {"dealname": format!("Deal {i}"), "amount": "1000"}}))
            .collect(),
        _ => return None,
    };

    Some(
        objects
            .into_iter()
            .map(|mut object| {
                object["createdAt"] = json!(created);
                object["updatedAt"] = json!(updated);
                object["archived"] = json!(false);
                object
            })
            .collect(),
    )
}
