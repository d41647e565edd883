use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRecord {
    pub photo_id: i64,
    pub profile_id: i64,
    pub photo_url: String,
    pub is_primary: bool,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
}
