//! The Flowdock client: resource tables, the event stream and push.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{FlowdockError, FlowdockResult};
use crate::events::Event;
use crate::models::{Flow, Organization, User};
use crate::rest::{self, basic_auth_headers, PushClient};
use crate::stream::{self, consumer, SessionState, StreamSession};
use crate::traits::HttpClient;

/// Where decoded events (and per-event decode errors) are delivered.
///
/// The client drops its sender after forwarding a terminal transport error,
/// so `recv()` returning `None` means the stream is over.
pub type EventSink = mpsc::Sender<FlowdockResult<Event>>;

/// A connected view of one Flowdock account.
///
/// Users, flows and organizations are fetched once at construction and are
/// read-only afterwards.
///
/// # Example
///
/// ```ignore
/// let mut client = flowdock::Client::new("api-key").await;
/// let (sink, mut events) = tokio::sync::mpsc::channel(64);
/// client.connect(&[], sink).await?;
/// while let Some(event) = events.recv().await {
///     println!("{:?}", event);
/// }
/// ```
pub struct Client {
    api_key: String,
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    users: HashMap<String, User>,
    flows: Vec<Flow>,
    organizations: Vec<Organization>,
    bootstrap_errors: Vec<FlowdockError>,
    session: Option<StreamSession>,
}

impl Client {
    /// Bootstrap against the public API.
    pub async fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, ClientConfig::default()).await
    }

    pub async fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Self {
        Self::with_http(api_key, config, Arc::new(ReqwestHttpClient::new())).await
    }

    /// Bootstrap through a caller-supplied transport.
    ///
    /// The three resources are fetched concurrently. A failed fetch leaves
    /// its table empty and is recorded in [`bootstrap_errors`](Self::bootstrap_errors);
    /// construction itself never fails.
    pub async fn with_http(
        api_key: impl Into<String>,
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let api_key = api_key.into();

        let (users, flows, organizations) = tokio::join!(
            rest::fetch_users(http.as_ref(), &config, &api_key),
            rest::fetch_flows(http.as_ref(), &config, &api_key),
            rest::fetch_organizations(http.as_ref(), &config, &api_key),
        );

        let mut bootstrap_errors = Vec::new();
        let users = or_empty(users, &mut bootstrap_errors);
        let flows = or_empty(flows, &mut bootstrap_errors);
        let organizations = or_empty(organizations, &mut bootstrap_errors);

        info!(
            "Bootstrapped {} users, {} flows, {} organizations",
            users.len(),
            flows.len(),
            organizations.len()
        );

        Self {
            api_key,
            config,
            http,
            users,
            flows,
            organizations,
            bootstrap_errors,
            session: None,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn users(&self) -> &HashMap<String, User> {
        &self.users
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    /// Fetch failures swallowed during construction.
    pub fn bootstrap_errors(&self) -> &[FlowdockError] {
        &self.bootstrap_errors
    }

    /// Look up a user by decimal id.
    pub fn details_for_user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Look up a flow by id.
    pub fn details_for_flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|flow| flow.id == id)
    }

    /// Stream URL for `flows`, or for every known flow when `flows` is empty.
    pub fn stream_url(&self, flows: &[Flow]) -> String {
        let flows = if flows.is_empty() { &self.flows[..] } else { flows };
        stream::stream_url(&self.config.stream_url, flows)
    }

    /// State of the stream session, `Idle` before [`connect`](Self::connect).
    pub fn session_state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(StreamSession::state)
            .unwrap_or(SessionState::Idle)
    }

    /// Start streaming events for `flows` (all known flows if empty) into `sink`.
    ///
    /// Returns once the server accepts the stream. A client streams at most
    /// once; a failed attempt can be retried.
    pub async fn connect(&mut self, flows: &[Flow], sink: EventSink) -> FlowdockResult<()> {
        if self.session.is_some() {
            return Err(FlowdockError::AlreadyConnected);
        }

        let url = self.stream_url(flows);
        let headers = basic_auth_headers(&self.api_key, &self.config.password);
        let mut session = StreamSession::new(self.http.clone(), url, headers);

        let (frame_tx, frame_rx) = mpsc::channel(self.config.channel_capacity);
        let (done_tx, done_rx) = oneshot::channel();
        session.connect(frame_tx, done_tx).await?;

        tokio::spawn(consumer::forward_events(frame_rx, done_rx, sink));
        self.session = Some(session);
        Ok(())
    }

    fn push_client(&self) -> PushClient {
        PushClient::with_http(self.config.clone(), self.http.clone())
    }

    /// Start a new thread in the flow owning `flow_key`.
    pub async fn push_message(
        &self,
        flow_key: &str,
        message: &str,
        sender: &str,
    ) -> FlowdockResult<()> {
        self.push_client()
            .push_message(flow_key, message, sender)
            .await
    }

    /// Reply in the thread rooted at `thread_id` (0 starts a new thread).
    pub async fn push_reply(
        &self,
        flow_key: &str,
        message: &str,
        sender: &str,
        thread_id: i64,
    ) -> FlowdockResult<()> {
        self.push_client()
            .push_reply(flow_key, message, sender, thread_id)
            .await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("users", &self.users.len())
            .field("flows", &self.flows.len())
            .field("organizations", &self.organizations.len())
            .field("session_state", &self.session_state())
            .finish()
    }
}

fn or_empty<T: Default>(result: FlowdockResult<T>, errors: &mut Vec<FlowdockError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Bootstrap fetch failed: {}", e);
            errors.push(e);
            T::default()
        }
    }
}
