//! REST API helpers: authenticated fetches, bootstrap and push.

pub mod bootstrap;
pub mod fetch;
pub mod push;

pub use bootstrap::{fetch_flows, fetch_organizations, fetch_users, users_by_id};
pub use fetch::basic_auth_headers;
pub use push::{build_push_form, PushClient};
