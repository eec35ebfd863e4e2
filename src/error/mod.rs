//! Error handling for the Flowdock client.
//!
//! | Kind | Raised by | Effect |
//! |------|-----------|--------|
//! | Transport | REST calls, stream reads | Ends a stream session |
//! | BootstrapFailed | `Client` construction | Logged, table left empty |
//! | MalformedEvent | Event decoder | Delivered to the sink, session continues |
//! | EventShapeMismatch | Event decoder | Delivered to the sink, session continues |
//! | PushFailed | Push helpers | Returned to the caller |
//! | Session | `Client::connect`, `StreamSession::connect` | Returned to the caller |

mod category;
mod flowdock_error;
mod result;

pub use crate::events::DecodeError;
pub use crate::traits::HttpError;
pub use category::ErrorKind;
pub use flowdock_error::{BootstrapResource, FlowdockError};
pub use result::FlowdockResult;
