use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_key, ClaimResponse, DEFAULT_ACCOUNT_KEY, FORM_ENDPOINTS, PAGE_SIZE};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn with_key(body: &str) -> String {
    if body.is_empty() {
        format!("AccountKey={DEFAULT_ACCOUNT_KEY}")
    } else {
        format!("AccountKey={DEFAULT_ACCOUNT_KEY}&{body}")
    }
}

/// Multipart body with text parts followed by one file part per `(name, filename, data)`.
fn multipart_request(uri: &str, text: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Request<String> {
    let mut body = String::new();
    for (name, value) in text {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    for (name, filename, data) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{}\r\n",
            String::from_utf8_lossy(data)
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

async fn page(body: &str) -> Value {
    let resp = app()
        .oneshot(form_request("/services/response/", &with_key(body)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- credentials ---

#[tokio::test]
async fn missing_account_key_is_rejected() {
    let resp = app()
        .oneshot(form_request("/services/archive/", "claimid=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "missing AccountKey");
}

#[tokio::test]
async fn custom_account_key_is_enforced() {
    let resp = app_with_key("other")
        .oneshot(form_request("/services/archive/", &with_key("claimid=1")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app_with_key("other")
        .oneshot(form_request("/services/archive/", "AccountKey=other&claimid=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- form endpoints ---

#[tokio::test]
async fn form_endpoints_echo_fields_without_the_key() {
    for endpoint in FORM_ENDPOINTS {
        let resp = app()
            .oneshot(form_request(endpoint, &with_key("eraid=42&pcn=A+B")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{endpoint}");
        let json = body_json(resp).await;
        assert_eq!(json["endpoint"], *endpoint);
        assert_eq!(json["fields"]["eraid"], "42");
        assert_eq!(json["fields"]["pcn"], "A B");
        assert!(json["fields"].get("AccountKey").is_none());
    }
}

#[tokio::test]
async fn get_is_not_routed() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/services/payerlist/")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- multipart endpoints ---

#[tokio::test]
async fn upload_reports_file_parts() {
    let resp = app()
        .oneshot(multipart_request(
            "/services/upload",
            &[("AccountKey", DEFAULT_ACCOUNT_KEY), ("Filename", "batch.837")],
            &[("File", "batch.837", b"ISA*00*~")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["endpoint"], "/services/upload");
    assert_eq!(json["fields"]["Filename"], "batch.837");
    assert_eq!(json["files"][0]["name"], "File");
    assert_eq!(json["files"][0]["filename"], "batch.837");
    assert_eq!(json["files"][0]["bytes"], 8);
}

#[tokio::test]
async fn multipart_without_file_part_is_rejected() {
    let resp = app()
        .oneshot(multipart_request(
            "/services/elig/",
            &[("AccountKey", DEFAULT_ACCOUNT_KEY), ("File", "not a file")],
            &[],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn multipart_checks_the_key() {
    let resp = app()
        .oneshot(multipart_request("/services/elig/", &[], &[("File", "x.270", b"ISA~")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- responses ---

#[tokio::test]
async fn responses_are_paged_with_a_cursor() {
    let first = page("ResponseID=0").await;
    let items: Vec<ClaimResponse> = serde_json::from_value(first["response"].clone()).unwrap();
    assert_eq!(items.len(), PAGE_SIZE);
    assert_eq!(first["last_responseid"], "2");

    let second = page("ResponseID=2").await;
    assert_eq!(second["last_responseid"], "4");

    let last = page("ResponseID=4").await;
    assert_eq!(last["response"].as_array().unwrap().len(), 1);
    assert!(last.get("last_responseid").is_none());
}

#[tokio::test]
async fn responses_filter_by_claim() {
    let json = page("ResponseID=0&ClaimID=CLM-100").await;
    let items: Vec<ClaimResponse> = serde_json::from_value(json["response"].clone()).unwrap();
    assert_eq!(items.iter().map(|r| r.responseid).collect::<Vec<_>>(), [1, 3]);
    assert!(json.get("last_responseid").is_none());
}

#[tokio::test]
async fn response_cursor_must_be_numeric() {
    let resp = app()
        .oneshot(form_request("/services/response/", &with_key("ResponseID=abc")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
