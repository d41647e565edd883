use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    Extension, Form,
};
use tracing::warn;

use crate::api::connection_api;
use crate::services::interest_guard::InterestSendGuard;
use crate::services::matches_service::{
    self, AppliedMatchFilters, MatchCardView, MatchesQuery,
};
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Template)]
#[template(path = "matches.html")]
pub struct MatchesTemplate {
    pub cards: Vec<MatchCardView>,
    pub filters: AppliedMatchFilters,
    pub page: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub notice_is_error: bool,
}

pub async fn matches_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<MatchesQuery>,
) -> Html<String> {
    let data = matches_service::build_matches_page(&auth_user.token, auth_user.id, &query).await;

    let (notice, notice_is_error) = notice_message(query.notice.as_deref());
    let template = MatchesTemplate {
        cards: data.cards,
        filters: data.filters,
        page: data.page,
        has_prev: data.has_prev,
        has_next: data.has_next,
        error: data.error,
        notice,
        notice_is_error,
    };
    Html(template.render().unwrap())
}

fn notice_message(code: Option<&str>) -> (Option<String>, bool) {
    match code {
        Some("sent") => (Some("Interest sent.".to_string()), false),
        Some("busy") => (
            Some("That interest request is still being sent.".to_string()),
            true,
        ),
        Some("error") => (
            Some("Could not send interest. Please try again.".to_string()),
            true,
        ),
        _ => (None, false),
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SendInterestForm {
    pub return_to: Option<String>,
}

/// Send interest to one candidate. The guard admits a single in-flight send
/// per candidate; a second submit while the first is pending redirects with
/// a "busy" notice and never reaches the backend.
pub async fn send_interest_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(receiver_id): Path<i64>,
    State(interest_sends): State<InterestSendGuard>,
    Form(form): Form<SendInterestForm>,
) -> impl IntoResponse {
    let notice = if !interest_sends.begin(auth_user.id, receiver_id) {
        "busy"
    } else {
        let result = connection_api::send_interest(&auth_user.token, receiver_id).await;
        interest_sends.finish(auth_user.id, receiver_id);
        match result {
            Ok(_) => "sent",
            Err(e) => {
                warn!(status = %e.status, receiver_id, "Send interest failed");
                "error"
            }
        }
    };

    let target = form
        .return_to
        .as_deref()
        .filter(|s| s.starts_with('/') && !s.starts_with("//") && !s.contains("://"))
        .unwrap_or("/matches");

    let sep = if target.contains('?') { "&" } else { "?" };
    Redirect::to(&format!("{}{}notice={}", target, sep, notice)).into_response()
}
