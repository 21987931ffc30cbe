//! Domain entities

mod message;
mod user;

pub use message::{Author, Message, NewMessage, BOT_DISPLAY_NAME};
pub use user::{NewUser, User};
