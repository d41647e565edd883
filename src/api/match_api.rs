use crate::api::client::{api_base_url, bearer_headers, connect_failed, read_json, ApiUpstreamError};
use crate::models::ProfileRecord;

/// One page of candidate matches, in backend order. Paging is skip/limit on
/// the wire; the caller translates its page number.
pub async fn find_matches(
    token: &str,
    skip: i64,
    limit: i64,
) -> Result<Vec<ProfileRecord>, ApiUpstreamError> {
    let url = format!("{}/matches/", api_base_url().trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .query(&[("skip", skip.max(0)), ("limit", limit.clamp(1, 100))])
        .headers(bearer_headers(token))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}
