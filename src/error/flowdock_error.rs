//! Unified error type for the Flowdock client.

use thiserror::Error;

use super::category::ErrorKind;
use crate::events::DecodeError;
use crate::traits::HttpError;

/// Which bootstrap table a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapResource {
    Users,
    Flows,
    Organizations,
}

impl BootstrapResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapResource::Users => "users",
            BootstrapResource::Flows => "flows",
            BootstrapResource::Organizations => "organizations",
        }
    }
}

impl std::fmt::Display for BootstrapResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every error the client can report.
///
/// Decode errors are delivered to the event sink as values next to normal
/// events; only [`FlowdockError::Transport`] ends a stream session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowdockError {
    /// Connection or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// A bootstrap fetch failed.
    #[error("failed to fetch {resource}: {reason}")]
    BootstrapFailed {
        resource: BootstrapResource,
        reason: String,
    },

    /// A stream frame could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The push endpoint rejected the post or could not be reached.
    #[error("push failed{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    PushFailed {
        status: Option<u16>,
        message: String,
    },

    /// `connect` was called while a session already exists.
    #[error("client already has a stream session")]
    AlreadyConnected,

    /// A session was started twice.
    #[error("stream session has already been started")]
    SessionNotIdle,
}

impl FlowdockError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlowdockError::Transport(_) => ErrorKind::Transport,
            FlowdockError::BootstrapFailed { .. } => ErrorKind::BootstrapFailed,
            FlowdockError::Decode(DecodeError::Malformed { .. }) => ErrorKind::MalformedEvent,
            FlowdockError::Decode(DecodeError::ShapeMismatch { .. }) => {
                ErrorKind::EventShapeMismatch
            }
            FlowdockError::PushFailed { .. } => ErrorKind::PushFailed,
            FlowdockError::AlreadyConnected | FlowdockError::SessionNotIdle => ErrorKind::Session,
        }
    }

    /// Returns true if this error ends a stream session.
    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }

    pub(crate) fn bootstrap(resource: BootstrapResource, reason: impl ToString) -> Self {
        FlowdockError::BootstrapFailed {
            resource,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            FlowdockError::from(HttpError::Closed).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            FlowdockError::bootstrap(BootstrapResource::Flows, "boom").kind(),
            ErrorKind::BootstrapFailed
        );
        assert_eq!(
            FlowdockError::from(DecodeError::Malformed {
                reason: "eof".to_string()
            })
            .kind(),
            ErrorKind::MalformedEvent
        );
        assert_eq!(
            FlowdockError::from(DecodeError::ShapeMismatch {
                tag: "comment".to_string(),
                reason: "missing field".to_string()
            })
            .kind(),
            ErrorKind::EventShapeMismatch
        );
        assert_eq!(FlowdockError::AlreadyConnected.kind(), ErrorKind::Session);
    }

    #[test]
    fn test_display() {
        let err = FlowdockError::bootstrap(BootstrapResource::Users, "expected value");
        assert_eq!(err.to_string(), "failed to fetch users: expected value");

        let err = FlowdockError::PushFailed {
            status: Some(404),
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "push failed (404): Not Found");

        let err = FlowdockError::PushFailed {
            status: None,
            message: "refused".to_string(),
        };
        assert_eq!(err.to_string(), "push failed: refused");

        let err = FlowdockError::Transport(HttpError::Closed);
        assert_eq!(err.to_string(), "transport error: Connection closed by server");
    }

    #[test]
    fn test_only_transport_is_terminal() {
        assert!(FlowdockError::Transport(HttpError::Io("x".to_string())).is_terminal());
        assert!(!FlowdockError::from(DecodeError::Malformed {
            reason: "x".to_string()
        })
        .is_terminal());
    }
}
