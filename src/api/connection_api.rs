use crate::api::client::{api_base_url, bearer_headers, connect_failed, read_json, ApiUpstreamError};
use crate::models::ConnectionRecord;

/// The caller's full connection list, both directions, unpaginated.
pub async fn my_connections(token: &str) -> Result<Vec<ConnectionRecord>, ApiUpstreamError> {
    let url = format!("{}/connections/", api_base_url().trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .headers(bearer_headers(token))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}

/// Send interest: create a pending connection from the caller to `receiver_id`.
/// The backend rejects duplicates in either direction with a 400.
pub async fn send_interest(
    token: &str,
    receiver_id: i64,
) -> Result<ConnectionRecord, ApiUpstreamError> {
    let url = format!("{}/connections/", api_base_url().trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .headers(bearer_headers(token))
        .json(&serde_json::json!({
            "receiver_id": receiver_id,
            "status": "pending",
        }))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}
