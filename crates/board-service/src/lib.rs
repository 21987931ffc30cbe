//! # board-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    SubmitMessageRequest,
};
pub use services::{
    AuthService, MessageService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
