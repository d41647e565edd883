use askama::Template;
use axum::{
    extract::{Multipart, Path, Query},
    response::{Html, IntoResponse, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use tracing::warn;

use crate::api::profile_api::{FamilyPayload, PreferencePayload, ProfilePayload};
use crate::services::profile_service::{self, ProfilePageData};
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub data: ProfilePageData,
    pub tab: String,
    pub notice: Option<String>,
    pub notice_is_error: bool,
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    pub tab: Option<String>,
    pub notice: Option<String>,
}

pub async fn profile_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ProfileQuery>,
) -> Html<String> {
    let data = profile_service::load_profile_page(&auth_user.token).await;

    let tab = match query.tab.as_deref() {
        Some("photos") => "photos",
        Some("preferences") => "preferences",
        Some("family") => "family",
        _ => "basic",
    }
    .to_string();

    let (notice, notice_is_error) = match query.notice.as_deref() {
        Some("saved") => (Some("Saved.".to_string()), false),
        Some("photo-added") => (Some("Photo uploaded.".to_string()), false),
        Some("photo-removed") => (Some("Photo deleted.".to_string()), false),
        Some("error") => (
            Some("Something went wrong. Please try again.".to_string()),
            true,
        ),
        _ => (None, false),
    };

    let template = ProfileTemplate {
        data,
        tab,
        notice,
        notice_is_error,
    };
    Html(template.render().unwrap())
}

#[derive(Debug, Deserialize)]
pub struct BasicInfoSubmit {
    first_name: String,
    last_name: String,
    gender: String,
    date_of_birth: String,
    marital_status: String,
    #[serde(default)]
    height: String,
    #[serde(default)]
    religion: String,
    #[serde(default)]
    caste: String,
    #[serde(default)]
    mother_tongue: String,
    #[serde(default)]
    about_me: String,
    #[serde(default)]
    occupation: String,
    #[serde(default)]
    education: String,
    #[serde(default)]
    income_bracket: String,
    #[serde(default)]
    location_city: String,
    #[serde(default)]
    location_state: String,
    #[serde(default)]
    location_country: String,
}

pub async fn save_basic_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Form(form): Form<BasicInfoSubmit>,
) -> impl IntoResponse {
    let payload = ProfilePayload {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        gender: form.gender.trim().to_string(),
        date_of_birth: form.date_of_birth.trim().to_string(),
        marital_status: form.marital_status.trim().to_string(),
        height: opt_f64(&form.height),
        religion: opt(form.religion),
        caste: opt(form.caste),
        mother_tongue: opt(form.mother_tongue),
        about_me: opt(form.about_me),
        occupation: opt(form.occupation),
        education: opt(form.education),
        income_bracket: opt(form.income_bracket),
        location_city: opt(form.location_city),
        location_state: opt(form.location_state),
        location_country: opt(form.location_country),
    };

    let notice = match profile_service::save_basic_info(&auth_user.token, &payload).await {
        Ok(_) => "saved",
        Err(e) => {
            warn!(status = %e.status, "Basic info save failed");
            "error"
        }
    };
    Redirect::to(&format!("/profile?notice={}", notice))
}

#[derive(Debug, Deserialize)]
pub struct PreferencesSubmit {
    #[serde(default)]
    min_age: String,
    #[serde(default)]
    max_age: String,
    #[serde(default)]
    height_min: String,
    #[serde(default)]
    height_max: String,
    #[serde(default)]
    religion: String,
    #[serde(default)]
    caste_preferences: String,
    #[serde(default)]
    education_level: String,
    #[serde(default)]
    income_min: String,
    #[serde(default)]
    location_preferences: String,
    #[serde(default)]
    other_preferences: String,
}

pub async fn save_preferences_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Form(form): Form<PreferencesSubmit>,
) -> impl IntoResponse {
    let payload = PreferencePayload {
        min_age: opt_i64(&form.min_age),
        max_age: opt_i64(&form.max_age),
        height_min: opt_f64(&form.height_min),
        height_max: opt_f64(&form.height_max),
        religion: opt(form.religion),
        caste_preferences: opt(form.caste_preferences),
        education_level: opt(form.education_level),
        income_min: opt_f64(&form.income_min),
        location_preferences: opt(form.location_preferences),
        other_preferences: opt(form.other_preferences),
    };

    let notice = match profile_service::save_preferences(&auth_user.token, &payload).await {
        Ok(_) => "saved",
        Err(e) => {
            warn!(status = %e.status, "Preferences save failed");
            "error"
        }
    };
    Redirect::to(&format!("/profile?tab=preferences&notice={}", notice))
}

#[derive(Debug, Deserialize)]
pub struct FamilySubmit {
    #[serde(default)]
    father_occupation: String,
    #[serde(default)]
    mother_occupation: String,
    #[serde(default)]
    siblings_count: String,
    #[serde(default)]
    family_type: String,
    #[serde(default)]
    family_values: String,
    #[serde(default)]
    about_family: String,
}

pub async fn save_family_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Form(form): Form<FamilySubmit>,
) -> impl IntoResponse {
    let payload = FamilyPayload {
        father_occupation: opt(form.father_occupation),
        mother_occupation: opt(form.mother_occupation),
        siblings_count: opt_i64(&form.siblings_count),
        family_type: opt(form.family_type),
        family_values: opt(form.family_values),
        about_family: opt(form.about_family),
    };

    let notice = match profile_service::save_family(&auth_user.token, &payload).await {
        Ok(_) => "saved",
        Err(e) => {
            warn!(status = %e.status, "Family details save failed");
            "error"
        }
    };
    Redirect::to(&format!("/profile?tab=family&notice={}", notice))
}

pub async fn upload_photo_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut uploaded = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "photo.jpg".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());
        let Ok(bytes) = field.bytes().await else {
            break;
        };
        if bytes.is_empty() {
            break;
        }

        match profile_service::add_photo(&auth_user.token, file_name, content_type, bytes.to_vec())
            .await
        {
            Ok(_) => uploaded = true,
            Err(e) => warn!(status = %e.status, "Photo upload failed"),
        }
        break;
    }

    let notice = if uploaded { "photo-added" } else { "error" };
    Redirect::to(&format!("/profile?tab=photos&notice={}", notice))
}

pub async fn delete_photo_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(photo_id): Path<i64>,
) -> impl IntoResponse {
    let notice = match profile_service::remove_photo(&auth_user.token, photo_id).await {
        Ok(_) => "photo-removed",
        Err(e) => {
            warn!(status = %e.status, photo_id, "Photo delete failed");
            "error"
        }
    };
    Redirect::to(&format!("/profile?tab=photos&notice={}", notice))
}

fn opt(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn opt_f64(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

fn opt_i64(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}
