use serde::{Deserialize, Serialize};

use super::User;

/// An organization as returned by `GET /organizations`, and embedded in
/// every [`Flow`](super::Flow).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Organization {
    pub id: i64,
    /// URL slug used in stream filters.
    #[serde(rename = "parameterized_name")]
    pub api_name: String,
    pub name: String,
    #[serde(rename = "url")]
    pub api_url: String,
    pub users: Vec<User>,
}
