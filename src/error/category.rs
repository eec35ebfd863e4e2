//! Error kind classification.
//!
//! Groups every [`FlowdockError`](super::FlowdockError) into one of the
//! kinds callers branch on: transient transport failures, bootstrap
//! failures, bad frames, and push failures.

use std::fmt;

/// High-level kind of a [`FlowdockError`](super::FlowdockError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection or I/O failure during a REST call or stream body read.
    Transport,

    /// One of the bootstrap fetches failed; its table is left empty.
    BootstrapFailed,

    /// A frame was not JSON, or had no string `event` field.
    MalformedEvent,

    /// A frame declared a known tag but its payload had the wrong shape.
    EventShapeMismatch,

    /// The push endpoint refused the message or could not be reached.
    PushFailed,

    /// The client or session was used out of order.
    Session,
}

impl ErrorKind {
    /// Returns true for kinds that end a stream session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ErrorKind::Transport)
    }

    /// Returns true for per-frame decode failures.
    pub fn is_decode(&self) -> bool {
        matches!(self, ErrorKind::MalformedEvent | ErrorKind::EventShapeMismatch)
    }

    /// Returns a short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::BootstrapFailed => "bootstrap-failed",
            ErrorKind::MalformedEvent => "malformed-event",
            ErrorKind::EventShapeMismatch => "event-shape-mismatch",
            ErrorKind::PushFailed => "push-failed",
            ErrorKind::Session => "session",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_terminal() {
        assert!(ErrorKind::Transport.is_terminal());
        assert!(!ErrorKind::MalformedEvent.is_terminal());
        assert!(!ErrorKind::EventShapeMismatch.is_terminal());
        assert!(!ErrorKind::BootstrapFailed.is_terminal());
        assert!(!ErrorKind::PushFailed.is_terminal());
    }

    #[test]
    fn test_decode_kinds() {
        assert!(ErrorKind::MalformedEvent.is_decode());
        assert!(ErrorKind::EventShapeMismatch.is_decode());
        assert!(!ErrorKind::Transport.is_decode());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ErrorKind::BootstrapFailed.to_string(), "bootstrap-failed");
        assert_eq!(ErrorKind::EventShapeMismatch.to_string(), "event-shape-mismatch");
    }
}
