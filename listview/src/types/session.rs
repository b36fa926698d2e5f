use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A remote desktop/shell session row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub connected_time: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Session {
    /// Time since `connected_time` formatted as `Xh Ym Zs`, or `-` when the
    /// session has no parseable connect time.
    pub fn connected_duration(&self, now: DateTime<FixedOffset>) -> String {
        let Ok(connected) = DateTime::parse_from_rfc3339(&self.connected_time) else {
            return "-".to_string();
        };
        let secs = now.signed_duration_since(connected).num_seconds().max(0);
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
