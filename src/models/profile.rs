use serde::Deserialize;

/// One profile as returned by the backend, both for the caller's own profile
/// and for `/matches/` page entries. Everything beyond the name and marital
/// status is optional; display code falls back to placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub profile_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub marital_status: String,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub caste: Option<String>,
    #[serde(default)]
    pub mother_tongue: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub income_bracket: Option<String>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_state: Option<String>,
    #[serde(default)]
    pub location_country: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}
