//! Push API: post to a flow under any display name using the flow's push key.
//!
//! No auth header is sent; the push key in the URL is the credential.

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{FlowdockError, FlowdockResult};
use crate::traits::{Headers, HttpClient};

/// Encode the push form body.
///
/// `message_id` is only included for replies (`thread_id != 0`).
pub fn build_push_form(message: &str, sender: &str, thread_id: i64) -> String {
    let mut fields = vec![("content", message.to_string()), ("external_user_name", sender.to_string())];
    if thread_id != 0 {
        fields.push(("message_id", thread_id.to_string()));
    }

    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Client for the push endpoint.
#[derive(Clone)]
pub struct PushClient {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl PushClient {
    /// Create a push client against the public API.
    pub fn new() -> Self {
        Self::with_http(ClientConfig::default(), Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { http, config }
    }

    /// Start a new thread in the flow owning `flow_key`.
    pub async fn push_message(
        &self,
        flow_key: &str,
        message: &str,
        sender: &str,
    ) -> FlowdockResult<()> {
        self.push(flow_key, message, sender, 0).await
    }

    /// Reply in the thread rooted at `thread_id`.
    ///
    /// A `thread_id` of 0 starts a new thread instead.
    pub async fn push_reply(
        &self,
        flow_key: &str,
        message: &str,
        sender: &str,
        thread_id: i64,
    ) -> FlowdockResult<()> {
        self.push(flow_key, message, sender, thread_id).await
    }

    async fn push(
        &self,
        flow_key: &str,
        message: &str,
        sender: &str,
        thread_id: i64,
    ) -> FlowdockResult<()> {
        let url = self.config.push_chat_url(flow_key);
        let body = build_push_form(message, sender, thread_id);

        let mut headers = Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );

        let response = self
            .http
            .post(&url, &body, &headers)
            .await
            .map_err(|e| FlowdockError::PushFailed {
                status: None,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Push to flow failed with status {}", response.status);
            return Err(FlowdockError::PushFailed {
                status: Some(response.status),
                message,
            });
        }

        Ok(())
    }
}

impl Default for PushClient {
    fn default() -> Self {
        Self::new()
    }
}
