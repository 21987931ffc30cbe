//! PostgreSQL repository implementations

mod error;
mod messages;
mod users;

pub use messages::PgMessageRepository;
pub use users::PgUserRepository;
