use serde::Deserialize;

use crate::api::client::{api_base_url, bearer_headers, connect_failed, read_json, ApiUpstreamError};
use crate::models::UserAccount;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub token_type: String,
}

/// Exchange credentials for a bearer token. The backend speaks the OAuth2
/// password flow, so this is a urlencoded form with `username`/`password`
/// fields, not JSON.
pub async fn login(email: &str, password: &str) -> Result<TokenResponse, ApiUpstreamError> {
    let url = format!("{}/token", api_base_url().trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .form(&[("username", email), ("password", password)])
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}

pub async fn register(email: &str, password: &str) -> Result<UserAccount, ApiUpstreamError> {
    let url = format!("{}/users/", api_base_url().trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .json(&serde_json::json!({
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}

pub async fn current_user(token: &str) -> Result<UserAccount, ApiUpstreamError> {
    let url = format!("{}/users/me/", api_base_url().trim_end_matches('/'));

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .headers(bearer_headers(token))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}
