//! Result type alias for Flowdock operations.

use super::flowdock_error::FlowdockError;

/// Type alias for Results using FlowdockError.
pub type FlowdockResult<T> = Result<T, FlowdockError>;
