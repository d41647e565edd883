use serde::Deserialize;

/// Partner preferences. Every field is optional; the backend keeps at most
/// one record per user.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceRecord {
    pub preference_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub min_age: Option<i64>,
    #[serde(default)]
    pub max_age: Option<i64>,
    #[serde(default)]
    pub height_min: Option<f64>,
    #[serde(default)]
    pub height_max: Option<f64>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub caste_preferences: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub income_min: Option<f64>,
    #[serde(default)]
    pub location_preferences: Option<String>,
    #[serde(default)]
    pub other_preferences: Option<String>,
}
