use chrono::Local;
use tracing::warn;

use crate::api::{connection_api, profile_api, ApiUpstreamError};
use crate::models::FamilyDetailRecord;
use crate::services::matches_service::{build_interest_map, compute_age, InterestState};

/// Another member's profile as shown to the viewer, including the viewer's
/// own interest state toward them.
pub struct MemberProfileView {
    pub user_id: i64,
    pub title: String,
    pub gender_label: String,
    pub religion_label: String,
    pub marital_status_label: String,
    pub occupation_label: String,
    pub education_label: String,
    pub income_label: String,
    pub mother_tongue_label: String,
    pub caste_label: String,
    pub height_label: String,
    pub about_me: String,
    pub location_label: String,
    pub photo_srcs: Vec<String>,
    pub family: Option<FamilyView>,
    pub interest: InterestState,
}

pub struct FamilyView {
    pub father_occupation: String,
    pub mother_occupation: String,
    pub siblings_label: String,
    pub family_type: String,
    pub family_values: String,
    pub about_family: String,
}

pub async fn load_member_view(
    token: &str,
    viewer_id: i64,
    user_id: i64,
) -> Result<Option<MemberProfileView>, ApiUpstreamError> {
    let Some(profile) = profile_api::member_profile(token, user_id).await? else {
        return Ok(None);
    };

    let photo_srcs = match profile_api::member_photos(token, user_id).await {
        Ok(photos) => photos
            .into_iter()
            .map(|p| format!("/photos/{}", p.photo_url.trim_start_matches('/')))
            .collect(),
        Err(e) => {
            warn!(status = %e.status, "Member photos fetch failed");
            vec![]
        }
    };

    let family = match profile_api::member_family(token, user_id).await {
        Ok(family) => family.map(family_view),
        Err(e) => {
            warn!(status = %e.status, "Member family fetch failed");
            None
        }
    };

    // Same degrade rule as the match browser: no connection snapshot means
    // no badge, not a failed page.
    let interest = match connection_api::my_connections(token).await {
        Ok(connections) => build_interest_map(&connections, viewer_id)
            .get(&user_id)
            .copied()
            .unwrap_or(InterestState::None),
        Err(e) => {
            warn!(status = %e.status, "Connections fetch failed for member view");
            InterestState::None
        }
    };

    let today = Local::now().date_naive();
    let title = match chrono::NaiveDate::parse_from_str(profile.date_of_birth.trim(), "%Y-%m-%d") {
        Ok(dob) => format!(
            "{} {}, {}",
            profile.first_name,
            profile.last_name,
            compute_age(dob, today)
        ),
        Err(_) => format!("{} {}", profile.first_name, profile.last_name),
    };

    let location_label = [
        profile.location_city.as_deref(),
        profile.location_state.as_deref(),
        profile.location_country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let gender_label = match profile.gender.to_lowercase().as_str() {
        "male" => "Male",
        "female" => "Female",
        _ => "Other",
    }
    .to_string();

    Ok(Some(MemberProfileView {
        user_id,
        title,
        gender_label,
        religion_label: label_or(profile.religion.as_deref(), "Not specified"),
        marital_status_label: profile.marital_status.replace('_', " "),
        occupation_label: label_or(profile.occupation.as_deref(), "Not specified"),
        education_label: label_or(profile.education.as_deref(), "Not specified"),
        income_label: label_or(profile.income_bracket.as_deref(), "Not specified"),
        mother_tongue_label: label_or(profile.mother_tongue.as_deref(), "Not specified"),
        caste_label: label_or(profile.caste.as_deref(), "Not specified"),
        height_label: profile
            .height
            .map(|h| format!("{} cm", h))
            .unwrap_or_else(|| "Not specified".to_string()),
        about_me: profile.about_me.unwrap_or_default(),
        location_label,
        photo_srcs,
        family,
        interest,
    }))
}

fn family_view(family: FamilyDetailRecord) -> FamilyView {
    FamilyView {
        father_occupation: label_or(family.father_occupation.as_deref(), "Not specified"),
        mother_occupation: label_or(family.mother_occupation.as_deref(), "Not specified"),
        siblings_label: family
            .siblings_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        family_type: label_or(family.family_type.as_deref(), "Not specified"),
        family_values: label_or(family.family_values.as_deref(), "Not specified"),
        about_family: family.about_family.unwrap_or_default(),
    }
}

fn label_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
