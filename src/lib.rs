//! Flowdock client - bootstrap account resources, stream flow events and
//! post through the push API.

pub mod adapters;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod prelude;
pub mod rest;
pub mod stream;
pub mod traits;

pub use client::{Client, EventSink};
pub use config::ClientConfig;
pub use error::{ErrorKind, FlowdockError, FlowdockResult};
pub use events::Event;
pub use models::{Flow, Organization, User};
