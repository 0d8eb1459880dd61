use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{multipart::MultipartError, Form, Multipart, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, warn};

/// Account key accepted by [`app`].
pub const DEFAULT_ACCOUNT_KEY: &str = "sandbox-account-key";

/// Responses returned per `/services/response/` page.
pub const PAGE_SIZE: usize = 2;

const ACCOUNT_KEY_FIELD: &str = "AccountKey";

/// Endpoints that take urlencoded fields and echo them back.
pub const FORM_ENDPOINTS: &[&str] = &[
    "/services/archive/",
    "/services/modify/",
    "/services/appeal/",
    "/services/notes/",
    "/services/eralist/",
    "/services/era835/",
    "/services/erapdf/",
    "/services/eradata/",
    "/services/eligdata/",
    "/services/uploadlist",
    "/services/payerlist/",
    "/services/enroll/",
];

/// Endpoints that take a multipart body with a `File` part.
pub const MULTIPART_ENDPOINTS: &[&str] = &["/services/upload", "/services/elig/"];

pub const RESPONSE_ENDPOINT: &str = "/services/response/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub responseid: u64,
    pub claimid: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct UploadedFile {
    name: String,
    filename: String,
    bytes: usize,
}

#[derive(Clone)]
struct AppState {
    account_key: Arc<str>,
    responses: Arc<Vec<ClaimResponse>>,
}

/// Error body in the shape `{"error": "..."}`.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<MultipartError> for Failure {
    fn from(e: MultipartError) -> Self {
        Self::new(e.status(), e.body_text())
    }
}

/// Status responses served by `/services/response/`, oldest first.
pub fn sample_responses() -> Vec<ClaimResponse> {
    [
        (1, "CLM-100", "A", "Accepted by Claim.MD"),
        (2, "CLM-101", "R", "Rejected: invalid subscriber id"),
        (3, "CLM-100", "A", "Accepted by payer"),
        (4, "CLM-102", "A", "Accepted by Claim.MD"),
        (5, "CLM-101", "A", "Accepted by payer"),
    ]
    .into_iter()
    .map(|(id, claim, status, message)| ClaimResponse {
        responseid: id,
        claimid: claim.to_string(),
        status: status.to_string(),
        message: message.to_string(),
    })
    .collect()
}

pub fn app() -> Router {
    app_with_key(DEFAULT_ACCOUNT_KEY)
}

pub fn app_with_key(account_key: &str) -> Router {
    let state = AppState {
        account_key: Arc::from(account_key),
        responses: Arc::new(sample_responses()),
    };
    let mut router: Router<AppState> = Router::new();
    for &path in FORM_ENDPOINTS {
        router = router.route(path, post(echo_form));
    }
    for &path in MULTIPART_ENDPOINTS {
        router = router.route(path, post(echo_multipart));
    }
    router
        .route(RESPONSE_ENDPOINT, post(list_responses))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Remove `AccountKey` from `fields` and compare it with the expected key.
fn check_account_key(state: &AppState, fields: &mut BTreeMap<String, String>) -> Result<(), Failure> {
    match fields.remove(ACCOUNT_KEY_FIELD) {
        Some(key) if key.as_str() == &*state.account_key => Ok(()),
        Some(_) => {
            warn!("rejected request with an unknown AccountKey");
            Err(Failure::new(StatusCode::UNAUTHORIZED, "invalid AccountKey"))
        }
        None => {
            warn!("rejected request without an AccountKey");
            Err(Failure::new(StatusCode::UNAUTHORIZED, "missing AccountKey"))
        }
    }
}

async fn echo_form(
    State(state): State<AppState>,
    uri: Uri,
    Form(mut fields): Form<BTreeMap<String, String>>,
) -> Result<Json<Value>, Failure> {
    check_account_key(&state, &mut fields)?;
    debug!(endpoint = uri.path(), fields = fields.len(), "form request");
    Ok(Json(json!({
        "result": "ok",
        "endpoint": uri.path(),
        "fields": fields,
    })))
}

async fn echo_multipart(
    State(state): State<AppState>,
    uri: Uri,
    mut multipart: Multipart,
) -> Result<Json<Value>, Failure> {
    let mut fields = BTreeMap::new();
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let data = field.bytes().await?;
                files.push(UploadedFile {
                    name,
                    filename,
                    bytes: data.len(),
                });
            }
            None => {
                fields.insert(name, field.text().await?);
            }
        }
    }

    check_account_key(&state, &mut fields)?;
    if !files.iter().any(|f| f.name == "File") {
        return Err(Failure::new(StatusCode::BAD_REQUEST, "missing File part"));
    }
    debug!(endpoint = uri.path(), files = files.len(), "multipart request");
    Ok(Json(json!({
        "result": "ok",
        "endpoint": uri.path(),
        "fields": fields,
        "files": files,
    })))
}

async fn list_responses(
    State(state): State<AppState>,
    Form(mut fields): Form<BTreeMap<String, String>>,
) -> Result<Json<Value>, Failure> {
    check_account_key(&state, &mut fields)?;
    let after: u64 = fields
        .get("ResponseID")
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| Failure::new(StatusCode::BAD_REQUEST, "ResponseID must be a number"))?;
    let claim = fields.get("ClaimID");

    let mut matching = state
        .responses
        .iter()
        .filter(|r| r.responseid > after)
        .filter(|r| claim.map_or(true, |c| &r.claimid == c));
    let page: Vec<ClaimResponse> = matching.by_ref().take(PAGE_SIZE).cloned().collect();
    let last_id = page.last().map(|r| r.responseid);

    let mut body = json!({ "response": page });
    if let (Some(last), Some(_)) = (last_id, matching.next()) {
        body["last_responseid"] = Value::String(last.to_string());
    }
    Ok(Json(body))
}
