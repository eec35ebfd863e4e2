use serde::{Deserialize, Serialize};

use super::Organization;

/// A flow (chat room) as returned by `GET /flows`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Flow {
    pub id: String,
    #[serde(rename = "url")]
    pub api_url: String,
    pub web_url: String,
    pub name: String,
    /// URL slug used in stream filters.
    #[serde(rename = "parameterized_name")]
    pub api_name: String,
    pub organization: Organization,
}

impl Flow {
    /// The `org/flow` pair identifying this flow in a stream filter.
    pub fn filter_token(&self) -> String {
        format!("{}/{}", self.organization.api_name, self.api_name)
    }
}
