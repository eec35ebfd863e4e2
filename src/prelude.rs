//! Prelude module for convenient imports.
//!
//! ```ignore
//! use flowdock::prelude::*;
//! ```

// Client and configuration
pub use crate::client::{Client, EventSink};
pub use crate::config::ClientConfig;

// Resources
pub use crate::models::{Flow, Organization, User};

// Events
pub use crate::events::{
    ActionEvent, CommentEvent, Event, EventEnvelope, FileEvent, MessageEditEvent, MessageEvent,
    StatusEvent, TagChangeEvent, UserActivityEvent, UserIsTypingEvent,
};

// Errors
pub use crate::error::{ErrorKind, FlowdockError, FlowdockResult};

// Streaming
pub use crate::stream::SessionState;

// Transport
pub use crate::traits::{HttpClient, HttpError};
