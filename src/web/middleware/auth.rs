use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::api::auth_api;

/// The logged-in account, resolved once per request and handed to handlers
/// through request extensions. `id` is the backend's numeric user id; `token`
/// is forwarded on every upstream call.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub token: String,
}

#[derive(Deserialize)]
struct JwtClaims {
    #[serde(default)]
    exp: Option<i64>,
}

pub async fn require_auth(mut request: Request, next: Next) -> Response {
    // Extract cookies from request
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("access_token="))
                .and_then(|c| c.strip_prefix("access_token="))
        })
        .map(|t| t.to_string());

    let Some(token) = token else {
        return Redirect::to("/login").into_response();
    };

    // A structurally broken or expired token goes straight back to the login
    // page without an upstream roundtrip.
    if !token_looks_valid(&token) {
        return Redirect::to("/login").into_response();
    }

    // The token's subject claim is the account email; the numeric user id
    // comes from the backend. That id keys all derived interest state, so it
    // is resolved here once and passed along explicitly.
    match auth_api::current_user(&token).await {
        Ok(account) => {
            request.extensions_mut().insert(AuthenticatedUser {
                id: account.user_id,
                token,
            });
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(status = %e.status, "Token rejected by backend");
            Redirect::to("/login").into_response()
        }
    }
}

fn token_looks_valid(token: &str) -> bool {
    // Parse JWT payload (middle part)
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return false;
    }
    let Ok(payload_bytes) = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]) else {
        return false;
    };
    let Ok(claims) = serde_json::from_slice::<JwtClaims>(&payload_bytes) else {
        return false;
    };
    match claims.exp {
        Some(exp) => exp > chrono::Utc::now().timestamp(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let body = general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("header.{}.signature", body)
    }

    #[test]
    fn rejects_tokens_without_three_segments() {
        assert!(!token_looks_valid("not-a-jwt"));
        assert!(!token_looks_valid("one.two"));
    }

    #[test]
    fn rejects_expired_tokens_locally() {
        let token = token_with_payload(r#"{"sub":"a@b.c","exp":1000000000}"#);
        assert!(!token_looks_valid(&token));
    }

    #[test]
    fn accepts_unexpired_tokens() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = token_with_payload(&format!(r#"{{"sub":"a@b.c","exp":{}}}"#, exp));
        assert!(token_looks_valid(&token));
    }
}
