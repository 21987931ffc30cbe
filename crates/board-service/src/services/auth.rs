//! Authentication service
//!
//! Handles user registration, login, and token validation.

use board_common::auth::{hash_password, verify_password};
use board_core::{DomainError, NewUser};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        if self
            .ctx
            .user_repo()
            .username_exists(&request.username)
            .await?
        {
            warn!(username = %request.username, "registration failed: username taken");
            return Err(ServiceError::Domain(DomainError::UsernameTaken));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // The repository re-checks uniqueness; a race between the check
        // above and the insert still surfaces as UsernameTaken.
        let user = self
            .ctx
            .user_repo()
            .create(NewUser {
                username: request.username,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "user registered");

        Ok(RegisterResponse {
            username: user.username,
        })
    }

    /// Login with username and password
    ///
    /// Unknown usernames and wrong passwords both produce
    /// `InvalidCredentials`; the response never distinguishes them.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!(username = %request.username, "login failed: user not found");
                ServiceError::App(board_common::AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(username = %user.username, "login failed: invalid password");
            return Err(ServiceError::App(
                board_common::AppError::InvalidCredentials,
            ));
        }

        let token = self
            .ctx
            .jwt_service()
            .issue_token(&user.username)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(username = %user.username, "user logged in");

        Ok(LoginResponse {
            token,
            username: user.username,
        })
    }

    /// Validate a session token and return the subject username
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> ServiceResult<String> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_token(token)
            .map_err(ServiceError::from)?;
        Ok(claims.sub)
    }
}
