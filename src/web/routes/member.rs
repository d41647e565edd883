use askama::Template;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse},
    Extension,
};
use tracing::warn;

use crate::services::member_service::{self, MemberProfileView};
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Template)]
#[template(path = "member.html")]
pub struct MemberTemplate {
    pub member: MemberProfileView,
    pub can_send_interest: bool,
    pub return_to: String,
}

pub async fn member_profile_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let view = match member_service::load_member_view(&auth_user.token, auth_user.id, user_id).await
    {
        Ok(v) => v,
        Err(e) => {
            warn!(status = %e.status, user_id, "Member profile load failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(member) = view else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let can_send_interest = user_id != auth_user.id && member.interest.is_none();
    let template = MemberTemplate {
        member,
        can_send_interest,
        return_to: format!("/members/{}", user_id),
    };
    Html(template.render().unwrap()).into_response()
}
