use axum::http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error from the matrimonial backend: the upstream status plus whatever JSON
/// body it sent along (FastAPI-style `{"detail": ...}` for most failures).
#[derive(Debug, Clone)]
pub struct ApiUpstreamError {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiUpstreamError {
    pub(crate) fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// Backend error message suitable for showing to the user, if any.
    pub fn detail(&self) -> Option<String> {
        self.body
            .as_ref()
            .and_then(|b| b.get("detail"))
            .and_then(|d| d.as_str())
            .map(|s| s.to_string())
    }
}

pub(crate) fn api_base_url() -> String {
    std::env::var("MATRIMONY_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

pub(crate) fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let auth_value = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

pub(crate) fn connect_failed(url: &str, err: impl ToString) -> ApiUpstreamError {
    ApiUpstreamError::new(
        StatusCode::BAD_GATEWAY,
        Some(serde_json::json!({
            "error": "connect_failed",
            "detail": err.to_string(),
            "url": url
        })),
    )
}

/// Check the upstream status and decode the JSON body. Non-2xx responses come
/// back as `ApiUpstreamError` with the body preserved for the caller.
pub(crate) async fn read_json<T: DeserializeOwned>(
    url: &str,
    resp: reqwest::Response,
) -> Result<T, ApiUpstreamError> {
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        let body: Option<Value> = resp.json().await.ok();
        return Err(ApiUpstreamError::new(status, body));
    }
    resp.json::<T>().await.map_err(|e| connect_failed(url, e))
}
