//! Frame decoding.
//!
//! A frame is one JSON object. Its `event` field picks the typed decoder;
//! tags without a dedicated type become [`Event::Action`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::Event;

pub const TAG_MESSAGE: &str = "message";
pub const TAG_STATUS: &str = "status";
pub const TAG_COMMENT: &str = "comment";
pub const TAG_MESSAGE_EDIT: &str = "message-edit";
pub const TAG_TAG_CHANGE: &str = "tag-change";
pub const TAG_USER_ACTIVITY: &str = "activity.user";
pub const TAG_FILE: &str = "file";
pub const TAG_TYPING: &str = "typing";
pub const TAG_ACTION: &str = "action";

/// Errors that can occur while decoding a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Not JSON, not an object, or no string `event` field
    Malformed { reason: String },
    /// The payload does not fit the type declared by its tag
    ShapeMismatch { tag: String, reason: String },
}

impl DecodeError {
    /// The tag of the offending frame, when it had one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            DecodeError::Malformed { .. } => None,
            DecodeError::ShapeMismatch { tag, .. } => Some(tag),
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Malformed { reason } => write!(f, "Malformed event: {}", reason),
            DecodeError::ShapeMismatch { tag, reason } => {
                write!(f, "Unexpected payload for event '{}': {}", tag, reason)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode one frame into a typed [`Event`].
///
/// Tags match exactly; there is no prefix matching.
pub fn decode_event(frame: &[u8]) -> Result<Event, DecodeError> {
    let value: Value = serde_json::from_slice(frame).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })?;

    let tag = match value.get("event") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => {
            return Err(DecodeError::Malformed {
                reason: format!("event field is not a string: {}", other),
            })
        }
        None => {
            return Err(DecodeError::Malformed {
                reason: "missing event field".to_string(),
            })
        }
    };

    match tag.as_str() {
        TAG_MESSAGE => typed(&tag, value).map(Event::Message),
        TAG_STATUS => typed(&tag, value).map(Event::Status),
        TAG_COMMENT => typed(&tag, value).map(Event::Comment),
        TAG_MESSAGE_EDIT => typed(&tag, value).map(Event::MessageEdit),
        TAG_TAG_CHANGE => typed(&tag, value).map(Event::TagChange),
        TAG_USER_ACTIVITY => typed(&tag, value).map(Event::UserActivity),
        TAG_FILE => typed(&tag, value).map(Event::File),
        TAG_TYPING => typed(&tag, value).map(Event::UserIsTyping),
        // "action" and every tag we have no type for
        _ => typed(&tag, value).map(Event::Action),
    }
}

fn typed<T: DeserializeOwned>(tag: &str, value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!("Failed to decode '{}' event: {}", tag, e);
        DecodeError::ShapeMismatch {
            tag: tag.to_string(),
            reason: e.to_string(),
        }
    })
}
