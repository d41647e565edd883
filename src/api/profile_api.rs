use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::api::client::{api_base_url, bearer_headers, connect_failed, read_json, ApiUpstreamError};
use crate::models::{FamilyDetailRecord, PhotoRecord, PreferenceRecord, ProfileRecord};

/// Profile fields as the edit form submits them. Optional fields are omitted
/// from the JSON when empty so the backend keeps its own defaults.
#[derive(Debug, Serialize)]
pub struct ProfilePayload {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub marital_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caste: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_tongue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_bracket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caste_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_preferences: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FamilyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siblings_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_family: Option<String>,
}

// Profile sections are optional on the backend until the user first saves
// them, so every "my ..." read maps a 404 to None instead of an error.

pub async fn my_profile(token: &str) -> Result<Option<ProfileRecord>, ApiUpstreamError> {
    get_optional(token, "/profiles/me/").await
}

pub async fn member_profile(
    token: &str,
    user_id: i64,
) -> Result<Option<ProfileRecord>, ApiUpstreamError> {
    get_optional(token, &format!("/profiles/{}", user_id)).await
}

pub async fn create_profile(
    token: &str,
    payload: &ProfilePayload,
) -> Result<ProfileRecord, ApiUpstreamError> {
    post_json(token, "/profiles/", payload).await
}

pub async fn update_profile(
    token: &str,
    payload: &ProfilePayload,
) -> Result<ProfileRecord, ApiUpstreamError> {
    put_json(token, "/profiles/me/", payload).await
}

pub async fn my_photos(token: &str) -> Result<Vec<PhotoRecord>, ApiUpstreamError> {
    Ok(get_optional(token, "/photos/me/").await?.unwrap_or_default())
}

pub async fn member_photos(token: &str, user_id: i64) -> Result<Vec<PhotoRecord>, ApiUpstreamError> {
    Ok(get_optional(token, &format!("/photos/{}", user_id))
        .await?
        .unwrap_or_default())
}

pub async fn upload_photo(
    token: &str,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    is_primary: bool,
) -> Result<PhotoRecord, ApiUpstreamError> {
    let url = format!("{}/photos/", api_base_url().trim_end_matches('/'));

    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&content_type)
        .map_err(|e| connect_failed(&url, e))?;
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("is_primary", is_primary.to_string())
        .text("visibility", "all");

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}

pub async fn delete_photo(token: &str, photo_id: i64) -> Result<(), ApiUpstreamError> {
    let url = format!(
        "{}/photos/{}",
        api_base_url().trim_end_matches('/'),
        photo_id
    );

    let client = reqwest::Client::new();
    let resp = client
        .delete(&url)
        .headers(bearer_headers(token))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    let _: Value = read_json(&url, resp).await?;
    Ok(())
}

pub async fn my_preferences(token: &str) -> Result<Option<PreferenceRecord>, ApiUpstreamError> {
    get_optional(token, "/preferences/me/").await
}

pub async fn create_preferences(
    token: &str,
    payload: &PreferencePayload,
) -> Result<PreferenceRecord, ApiUpstreamError> {
    post_json(token, "/preferences/", payload).await
}

pub async fn update_preferences(
    token: &str,
    payload: &PreferencePayload,
) -> Result<PreferenceRecord, ApiUpstreamError> {
    put_json(token, "/preferences/me/", payload).await
}

pub async fn my_family(token: &str) -> Result<Option<FamilyDetailRecord>, ApiUpstreamError> {
    get_optional(token, "/family/me/").await
}

pub async fn member_family(
    token: &str,
    user_id: i64,
) -> Result<Option<FamilyDetailRecord>, ApiUpstreamError> {
    get_optional(token, &format!("/family/{}", user_id)).await
}

pub async fn create_family(
    token: &str,
    payload: &FamilyPayload,
) -> Result<FamilyDetailRecord, ApiUpstreamError> {
    post_json(token, "/family/", payload).await
}

pub async fn update_family(
    token: &str,
    payload: &FamilyPayload,
) -> Result<FamilyDetailRecord, ApiUpstreamError> {
    put_json(token, "/family/me/", payload).await
}

async fn get_optional<T: serde::de::DeserializeOwned>(
    token: &str,
    path: &str,
) -> Result<Option<T>, ApiUpstreamError> {
    let url = format!("{}{}", api_base_url().trim_end_matches('/'), path);

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .headers(bearer_headers(token))
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    if resp.status().as_u16() == StatusCode::NOT_FOUND.as_u16() {
        return Ok(None);
    }
    read_json(&url, resp).await.map(Some)
}

async fn post_json<T: serde::de::DeserializeOwned>(
    token: &str,
    path: &str,
    payload: &impl Serialize,
) -> Result<T, ApiUpstreamError> {
    let url = format!("{}{}", api_base_url().trim_end_matches('/'), path);

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .headers(bearer_headers(token))
        .json(payload)
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}

async fn put_json<T: serde::de::DeserializeOwned>(
    token: &str,
    path: &str,
    payload: &impl Serialize,
) -> Result<T, ApiUpstreamError> {
    let url = format!("{}{}", api_base_url().trim_end_matches('/'), path);

    let client = reqwest::Client::new();
    let resp = client
        .put(&url)
        .headers(bearer_headers(token))
        .json(payload)
        .send()
        .await
        .map_err(|e| connect_failed(&url, e))?;

    read_json(&url, resp).await
}
