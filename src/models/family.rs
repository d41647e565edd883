use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyDetailRecord {
    pub family_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub father_occupation: Option<String>,
    #[serde(default)]
    pub mother_occupation: Option<String>,
    #[serde(default)]
    pub siblings_count: Option<i64>,
    #[serde(default)]
    pub family_type: Option<String>,
    #[serde(default)]
    pub family_values: Option<String>,
    #[serde(default)]
    pub about_family: Option<String>,
}
