//! Message handlers
//!
//! Endpoints for submitting, listing, and fetching board messages.

use axum::{
    extract::{Path, State},
    Json,
};
use board_service::{MessageResponse, MessageService, SubmitMessageRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Submit a new message as the authenticated user
///
/// POST /api/submit
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SubmitMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.submit(&auth.username, request).await?;
    Ok(Created(Json(response)))
}

/// List all messages, newest first
///
/// GET /api/messages
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.list().await?;
    Ok(Json(response))
}

/// Fetch a single message by id
///
/// GET /api/message/:id
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.get(id).await?;
    Ok(Json(response))
}
