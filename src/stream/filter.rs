//! Stream URL construction.

use crate::models::Flow;

/// Comma-separated `org/flow` pairs for the `filter` query parameter.
///
/// Slugs are used as-is; the API only hands out URL-safe slugs.
pub fn filter_param(flows: &[Flow]) -> String {
    flows
        .iter()
        .map(Flow::filter_token)
        .collect::<Vec<_>>()
        .join(",")
}

/// Full stream URL for `flows` under the streaming base URL.
pub fn stream_url(base_url: &str, flows: &[Flow]) -> String {
    format!("{}/flows?filter={}", base_url, filter_param(flows))
}
