use serde::Deserialize;

/// A directed interest/connection record owned by the backend. The front end
/// only ever holds a read-only snapshot of the caller's full list.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRecord {
    pub connection_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    /// `pending`, `accepted`, or a terminal state such as `rejected`.
    pub status: String,
    #[serde(default)]
    pub connection_date: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}
