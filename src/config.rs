//! Client configuration.

/// Base URL of the REST API.
pub const DEFAULT_API_URL: &str = "https://api.flowdock.com";
/// Base URL of the streaming API.
pub const DEFAULT_STREAM_URL: &str = "https://stream.flowdock.com";
/// Base URL of the push API.
pub const DEFAULT_PUSH_URL: &str = "https://api.flowdock.com";
/// The API rejects basic auth with an empty password, so any non-empty
/// string is sent alongside the API key.
pub const PLACEHOLDER_PASSWORD: &str = "BATMAN";
/// Raw frames buffered between the stream reader and the event consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Endpoints and tuning for a [`Client`](crate::Client).
///
/// # Example
///
/// ```ignore
/// use flowdock::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_url("http://localhost:8080")
///     .with_stream_url("http://localhost:8081");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST API base URL (users, flows, organizations)
    pub api_url: String,
    /// Streaming API base URL
    pub stream_url: String,
    /// Push API base URL
    pub push_url: String,
    /// Basic auth password sent with the API key
    pub password: String,
    /// Capacity of the raw frame channel
    pub channel_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            stream_url: DEFAULT_STREAM_URL.to_string(),
            push_url: DEFAULT_PUSH_URL.to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = trim_base(url.into());
        self
    }

    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = trim_base(url.into());
        self
    }

    pub fn with_push_url(mut self, url: impl Into<String>) -> Self {
        self.push_url = trim_base(url.into());
        self
    }

    /// Override the basic auth password. Empty passwords are ignored.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        if !password.is_empty() {
            self.password = password;
        }
        self
    }

    /// Set the raw frame channel capacity (at least 1).
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Build a config from `FLOWDOCK_API_URL`, `FLOWDOCK_STREAM_URL` and
    /// `FLOWDOCK_PUSH_URL`, falling back to the public endpoints.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("FLOWDOCK_API_URL") {
            config = config.with_api_url(url);
        }
        if let Ok(url) = std::env::var("FLOWDOCK_STREAM_URL") {
            config = config.with_stream_url(url);
        }
        if let Ok(url) = std::env::var("FLOWDOCK_PUSH_URL") {
            config = config.with_push_url(url);
        }
        config
    }

    pub(crate) fn users_url(&self) -> String {
        format!("{}/users", self.api_url)
    }

    pub(crate) fn flows_url(&self) -> String {
        format!("{}/flows", self.api_url)
    }

    pub(crate) fn organizations_url(&self) -> String {
        format!("{}/organizations", self.api_url)
    }

    pub(crate) fn push_chat_url(&self, flow_key: &str) -> String {
        format!("{}/v1/messages/chat/{}", self.push_url, flow_key)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
