use serde::{Deserialize, Serialize};

/// A time-bounded admin session record. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub is_authenticated: bool,
    pub login_time: i64,
    pub expires_at: i64,
}
