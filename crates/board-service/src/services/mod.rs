//! Services and their shared context

mod auth;
mod context;
mod error;
mod message;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
