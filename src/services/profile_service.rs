use tracing::warn;

use crate::api::profile_api::{self, FamilyPayload, PreferencePayload, ProfilePayload};
use crate::api::ApiUpstreamError;
use crate::models::{FamilyDetailRecord, PhotoRecord, PreferenceRecord, ProfileRecord};

/// The self-profile editor, one struct per tab, all values pre-rendered as
/// form strings (empty when the backend has nothing yet).
pub struct ProfilePageData {
    pub basic: BasicInfoForm,
    pub photos: Vec<PhotoView>,
    pub preferences: PreferencesForm,
    pub family: FamilyForm,
}

#[derive(Default)]
pub struct BasicInfoForm {
    pub exists: bool,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub height: String,
    pub religion: String,
    pub caste: String,
    pub mother_tongue: String,
    pub about_me: String,
    pub occupation: String,
    pub education: String,
    pub income_bracket: String,
    pub location_city: String,
    pub location_state: String,
    pub location_country: String,
}

pub struct PhotoView {
    pub photo_id: i64,
    pub src: String,
    pub is_primary: bool,
}

#[derive(Default)]
pub struct PreferencesForm {
    pub exists: bool,
    pub min_age: String,
    pub max_age: String,
    pub height_min: String,
    pub height_max: String,
    pub religion: String,
    pub caste_preferences: String,
    pub education_level: String,
    pub income_min: String,
    pub location_preferences: String,
    pub other_preferences: String,
}

#[derive(Default)]
pub struct FamilyForm {
    pub exists: bool,
    pub father_occupation: String,
    pub mother_occupation: String,
    pub siblings_count: String,
    pub family_type: String,
    pub family_values: String,
    pub about_family: String,
}

/// Each tab's data is fetched independently; a section the user never saved
/// comes back 404 from the backend and renders as an empty form. Other
/// failures degrade the same way rather than blocking the whole page.
pub async fn load_profile_page(token: &str) -> ProfilePageData {
    let basic = match profile_api::my_profile(token).await {
        Ok(profile) => profile.map(basic_form).unwrap_or_default(),
        Err(e) => {
            warn!(status = %e.status, "Profile fetch failed");
            BasicInfoForm::default()
        }
    };

    let photos = match profile_api::my_photos(token).await {
        Ok(photos) => photos.into_iter().map(photo_view).collect(),
        Err(e) => {
            warn!(status = %e.status, "Photos fetch failed");
            vec![]
        }
    };

    let preferences = match profile_api::my_preferences(token).await {
        Ok(prefs) => prefs.map(preferences_form).unwrap_or_default(),
        Err(e) => {
            warn!(status = %e.status, "Preferences fetch failed");
            PreferencesForm::default()
        }
    };

    let family = match profile_api::my_family(token).await {
        Ok(family) => family.map(family_form).unwrap_or_default(),
        Err(e) => {
            warn!(status = %e.status, "Family details fetch failed");
            FamilyForm::default()
        }
    };

    ProfilePageData {
        basic,
        photos,
        preferences,
        family,
    }
}

pub async fn save_basic_info(token: &str, payload: &ProfilePayload) -> Result<(), ApiUpstreamError> {
    if profile_api::my_profile(token).await?.is_some() {
        profile_api::update_profile(token, payload).await?;
    } else {
        profile_api::create_profile(token, payload).await?;
    }
    Ok(())
}

pub async fn save_preferences(
    token: &str,
    payload: &PreferencePayload,
) -> Result<(), ApiUpstreamError> {
    if profile_api::my_preferences(token).await?.is_some() {
        profile_api::update_preferences(token, payload).await?;
    } else {
        profile_api::create_preferences(token, payload).await?;
    }
    Ok(())
}

pub async fn save_family(token: &str, payload: &FamilyPayload) -> Result<(), ApiUpstreamError> {
    if profile_api::my_family(token).await?.is_some() {
        profile_api::update_family(token, payload).await?;
    } else {
        profile_api::create_family(token, payload).await?;
    }
    Ok(())
}

/// The first photo a user uploads becomes their primary profile photo.
pub async fn add_photo(
    token: &str,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
) -> Result<(), ApiUpstreamError> {
    let existing = profile_api::my_photos(token).await?;
    let is_primary = existing.is_empty();
    profile_api::upload_photo(token, file_name, content_type, bytes, is_primary).await?;
    Ok(())
}

pub async fn remove_photo(token: &str, photo_id: i64) -> Result<(), ApiUpstreamError> {
    profile_api::delete_photo(token, photo_id).await
}

fn basic_form(profile: ProfileRecord) -> BasicInfoForm {
    BasicInfoForm {
        exists: true,
        first_name: profile.first_name,
        last_name: profile.last_name,
        gender: profile.gender,
        date_of_birth: profile.date_of_birth,
        marital_status: profile.marital_status,
        height: profile.height.map(fmt_num).unwrap_or_default(),
        religion: profile.religion.unwrap_or_default(),
        caste: profile.caste.unwrap_or_default(),
        mother_tongue: profile.mother_tongue.unwrap_or_default(),
        about_me: profile.about_me.unwrap_or_default(),
        occupation: profile.occupation.unwrap_or_default(),
        education: profile.education.unwrap_or_default(),
        income_bracket: profile.income_bracket.unwrap_or_default(),
        location_city: profile.location_city.unwrap_or_default(),
        location_state: profile.location_state.unwrap_or_default(),
        location_country: profile.location_country.unwrap_or_default(),
    }
}

fn photo_view(photo: PhotoRecord) -> PhotoView {
    PhotoView {
        photo_id: photo.photo_id,
        src: format!("/photos/{}", photo.photo_url.trim_start_matches('/')),
        is_primary: photo.is_primary,
    }
}

fn preferences_form(prefs: PreferenceRecord) -> PreferencesForm {
    PreferencesForm {
        exists: true,
        min_age: prefs.min_age.map(|v| v.to_string()).unwrap_or_default(),
        max_age: prefs.max_age.map(|v| v.to_string()).unwrap_or_default(),
        height_min: prefs.height_min.map(fmt_num).unwrap_or_default(),
        height_max: prefs.height_max.map(fmt_num).unwrap_or_default(),
        religion: prefs.religion.unwrap_or_default(),
        caste_preferences: prefs.caste_preferences.unwrap_or_default(),
        education_level: prefs.education_level.unwrap_or_default(),
        income_min: prefs.income_min.map(fmt_num).unwrap_or_default(),
        location_preferences: prefs.location_preferences.unwrap_or_default(),
        other_preferences: prefs.other_preferences.unwrap_or_default(),
    }
}

fn family_form(family: FamilyDetailRecord) -> FamilyForm {
    FamilyForm {
        exists: true,
        father_occupation: family.father_occupation.unwrap_or_default(),
        mother_occupation: family.mother_occupation.unwrap_or_default(),
        siblings_count: family
            .siblings_count
            .map(|v| v.to_string())
            .unwrap_or_default(),
        family_type: family.family_type.unwrap_or_default(),
        family_values: family.family_values.unwrap_or_default(),
        about_family: family.about_family.unwrap_or_default(),
    }
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
