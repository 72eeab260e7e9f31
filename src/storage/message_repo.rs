use crate::domain::message::Message;
use crate::error::Result;
use crate::storage::records::MessageRecord;
use crate::storage::{DbPool, MessageStore};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: DbPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn all_messages(&self) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT message_id, posted_by, message_text, time_posted_epoch
            FROM message
            ORDER BY message_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn message_by_id(&self, message_id: i32) -> Result<Option<Message>> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT message_id, posted_by, message_text, time_posted_epoch
            FROM message
            WHERE message_id = $1
            ",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn insert_message(
        &self,
        posted_by: i32,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<Option<Message>> {
        let result = sqlx::query_as::<_, MessageRecord>(
            r"
            INSERT INTO message (posted_by, message_text, time_posted_epoch)
            VALUES ($1, $2, $3)
            RETURNING message_id, posted_by, message_text, time_posted_epoch
            ",
        )
        .bind(posted_by)
        .bind(message_text)
        .bind(time_posted_epoch)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(Some(record.into())),
            Err(e) => {
                tracing::warn!(error = %e, posted_by, "Message insert rejected");
                Ok(None)
            }
        }
    }

    async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<()> {
        sqlx::query("UPDATE message SET message_text = $1 WHERE message_id = $2")
            .bind(message_text)
            .bind(message_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, message_id: i32) -> Result<Option<Message>> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r"
            DELETE FROM message
            WHERE message_id = $1
            RETURNING message_id, posted_by, message_text, time_posted_epoch
            ",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn messages_posted_by(&self, account_id: i32) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT message_id, posted_by, message_text, time_posted_epoch
            FROM message
            WHERE posted_by = $1
            ORDER BY message_id
            ",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
