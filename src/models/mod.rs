//! Resource records returned by the REST API.

mod flow;
mod organization;
mod user;

pub use flow::Flow;
pub use organization::Organization;
pub use user::User;
