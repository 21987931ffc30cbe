//! Message service
//!
//! Submitting, listing, and fetching board messages, plus the bot reply
//! follow-up for trigger-prefixed submissions.

use board_bot::extract_prompt;
use board_core::{DomainError, NewMessage};
use tracing::{error, info, instrument};

use crate::dto::{MessageResponse, SubmitMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a message as the given user.
    ///
    /// The message is persisted, then broadcast. When the body starts
    /// with the bot trigger, a background task asks the responder for a
    /// reply and records it as a bot-authored message; the submit
    /// response does not wait for it.
    #[instrument(skip(self, request), fields(username = %username))]
    pub async fn submit(
        &self,
        username: &str,
        request: SubmitMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        if request.message.trim().is_empty() {
            return Err(ServiceError::Domain(DomainError::EmptyMessageBody));
        }

        let message = self
            .ctx
            .message_repo()
            .create(NewMessage::from_user(username, request.message))
            .await?;

        info!(message_id = message.id, "message recorded");
        self.ctx.broadcaster().message_created(&message);

        if let Some(prompt) = extract_prompt(self.ctx.bot_trigger(), &message.body) {
            self.spawn_bot_reply(prompt.to_string());
        }

        Ok(MessageResponse::from(message))
    }

    /// List all messages, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().list_newest_first().await?;
        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Fetch a single message by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::MessageNotFound(id)))?;
        Ok(MessageResponse::from(message))
    }

    /// Ask the responder for a reply in the background. The retry
    /// schedule can run for a while and must not hold the request.
    fn spawn_bot_reply(&self, prompt: String) {
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            let reply = ctx.responder().reply(&prompt).await;

            match ctx
                .message_repo()
                .create(NewMessage::from_bot(reply))
                .await
            {
                Ok(message) => {
                    info!(message_id = message.id, "bot reply recorded");
                    ctx.broadcaster().message_created(&message);
                }
                Err(e) => {
                    error!(error = %e, "failed to record bot reply");
                }
            }
        });
    }
}
