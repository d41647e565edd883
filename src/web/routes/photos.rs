use axum::{
    extract::Path,
    http::StatusCode,
    response::Response,
    Extension,
};
use tracing::error;

use crate::api::client::api_base_url;
use crate::web::middleware::auth::AuthenticatedUser;

/// Stream a stored photo from the backend to the browser. The backend keeps
/// uploads behind the API origin; routing the bytes through here keeps that
/// origin private and reuses the caller's own token.
pub async fn photo_proxy(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(path): Path<String>,
) -> Result<Response, StatusCode> {
    let content_url = format!(
        "{}/{}",
        api_base_url().trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    let client = reqwest::Client::new();
    let content_resp = client
        .get(&content_url)
        .header("Authorization", format!("Bearer {}", auth_user.token))
        .send()
        .await
        .map_err(|e| {
            error!("Photo fetch failed: {}", e);
            StatusCode::BAD_GATEWAY
        })?;

    if !content_resp.status().is_success() {
        return Err(StatusCode::NOT_FOUND);
    }

    let content_type = content_resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    let bytes = content_resp.bytes().await.map_err(|e| {
        error!("Photo body read failed: {}", e);
        StatusCode::BAD_GATEWAY
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Cache-Control", "public, max-age=3600")
        .body(axum::body::Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
