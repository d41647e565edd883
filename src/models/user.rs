use serde::Deserialize;

/// The authenticated account as returned by `/users/me/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    pub user_id: i64,
    pub email: String,
    #[serde(default)]
    pub profile_complete: bool,
    #[serde(default)]
    pub account_status: Option<String>,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}
