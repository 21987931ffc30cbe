//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use board_core::{Message, MessageRepository, NewMessage, RepoResult};

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(author = %message.author.display_name()))]
    async fn create(&self, message: NewMessage) -> RepoResult<Message> {
        let result = sqlx::query_as::<_, MessageModel>(
            r"
            INSERT INTO messages (author_name, is_bot, body, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, author_name, is_bot, body, created_at
            ",
        )
        .bind(message.author.display_name())
        .bind(message.author.is_bot())
        .bind(&message.body)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, author_name, is_bot, body, created_at
            FROM messages
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn list_newest_first(&self) -> RepoResult<Vec<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, author_name, is_bot, body, created_at
            FROM messages
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Message::from).collect())
    }
}
