use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A user as returned by `GET /users`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub nick: String,
    #[serde(rename = "avatar")]
    pub avatar_url: String,
    pub status: String,
    /// Seconds since the epoch.
    pub last_activity: i64,
    /// Seconds since the epoch.
    pub last_ping: i64,
    pub email: String,
}

impl User {
    /// The key this user is stored under in the client's user table.
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    pub fn last_activity_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.last_activity, 0).single()
    }
}
