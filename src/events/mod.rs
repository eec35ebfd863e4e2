//! Stream event types and the frame decoder.
//!
//! # Module structure
//! - `types` - The [`Event`] enum and per-type payloads
//! - `decoder` - [`decode_event`] and [`DecodeError`]

mod decoder;
mod types;

pub use decoder::{
    decode_event, DecodeError, TAG_ACTION, TAG_COMMENT, TAG_FILE, TAG_MESSAGE, TAG_MESSAGE_EDIT,
    TAG_STATUS, TAG_TAG_CHANGE, TAG_TYPING, TAG_USER_ACTIVITY,
};
pub use types::{
    ActionEvent, CommentContent, CommentEvent, Event, EventEnvelope, FileEvent,
    MessageEditContent, MessageEditEvent, MessageEvent, StatusEvent, TagChangeContent,
    TagChangeEvent, UserActivityContent, UserActivityEvent, UserIsTypingEvent,
};
