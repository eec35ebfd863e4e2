//! Streaming API: framing, URL construction and the session lifecycle.

pub(crate) mod consumer;
pub mod filter;
pub mod framer;
pub mod session;

pub use filter::{filter_param, stream_url};
pub use framer::LineFramer;
pub use session::{SessionState, StreamSession};
