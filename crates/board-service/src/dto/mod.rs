//! Request and response DTOs

mod requests;
mod responses;

pub use requests::{LoginRequest, RegisterRequest, SubmitMessageRequest};
pub use responses::{LoginResponse, MessageResponse, RegisterResponse};
