//! Bootstrap fetches for users, flows and organizations.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use super::fetch;
use crate::config::ClientConfig;
use crate::error::{BootstrapResource, FlowdockError, FlowdockResult};
use crate::models::{Flow, Organization, User};
use crate::traits::HttpClient;

/// Fetch `GET /users`, keyed by the decimal user id.
pub async fn fetch_users(
    http: &dyn HttpClient,
    config: &ClientConfig,
    api_key: &str,
) -> FlowdockResult<HashMap<String, User>> {
    let users: Vec<User> = fetch_resource(
        http,
        config,
        api_key,
        &config.users_url(),
        BootstrapResource::Users,
    )
    .await?;
    Ok(users_by_id(users))
}

/// Fetch `GET /flows`.
pub async fn fetch_flows(
    http: &dyn HttpClient,
    config: &ClientConfig,
    api_key: &str,
) -> FlowdockResult<Vec<Flow>> {
    fetch_resource(
        http,
        config,
        api_key,
        &config.flows_url(),
        BootstrapResource::Flows,
    )
    .await
}

/// Fetch `GET /organizations`.
pub async fn fetch_organizations(
    http: &dyn HttpClient,
    config: &ClientConfig,
    api_key: &str,
) -> FlowdockResult<Vec<Organization>> {
    fetch_resource(
        http,
        config,
        api_key,
        &config.organizations_url(),
        BootstrapResource::Organizations,
    )
    .await
}

/// Index users by the decimal form of their id.
pub fn users_by_id(users: Vec<User>) -> HashMap<String, User> {
    users.into_iter().map(|user| (user.key(), user)).collect()
}

async fn fetch_resource<T: DeserializeOwned>(
    http: &dyn HttpClient,
    config: &ClientConfig,
    api_key: &str,
    url: &str,
    resource: BootstrapResource,
) -> FlowdockResult<T> {
    let body = fetch::get(http, api_key, &config.password, url)
        .await
        .map_err(|e| FlowdockError::bootstrap(resource, e))?;
    serde_json::from_slice(&body).map_err(|e| FlowdockError::bootstrap(resource, e))
}
