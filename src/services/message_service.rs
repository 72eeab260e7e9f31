use crate::domain::message::{Message, validate_text};
use crate::error::{AppError, Result};
use crate::storage::{AccountStore, MessageStore};
use opentelemetry::{
    KeyValue, global,
    metrics::Counter,
};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Metrics {
    messages_posted_total: Counter<u64>,
    messages_deleted_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("social-media-api");
        Self {
            messages_posted_total: meter
                .u64_counter("messages_posted_total")
                .with_description("Total number of message submissions")
                .build(),
            messages_deleted_total: meter
                .u64_counter("messages_deleted_total")
                .with_description("Total number of messages removed")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountStore>,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(messages: Arc<dyn MessageStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { messages, accounts, metrics: Metrics::new() }
    }

    /// # Errors
    /// Returns `AppError::Database` if the store cannot be read.
    pub async fn all_messages(&self) -> Result<Vec<Message>> {
        self.messages.all_messages().await
    }

    /// # Errors
    /// Returns `AppError::Database` if the store cannot be read.
    pub async fn message_by_id(&self, message_id: i32) -> Result<Option<Message>> {
        self.messages.message_by_id(message_id).await
    }

    /// Lists an account's messages. Unknown accounts simply have none.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store cannot be read.
    pub async fn messages_by_account(&self, account_id: i32) -> Result<Vec<Message>> {
        self.messages.messages_posted_by(account_id).await
    }

    /// Stores a new message once its text and author have been checked.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the text is blank or too long, the
    /// author does not exist, or the store refuses the insert.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, message_text),
        fields(message_id = tracing::field::Empty)
    )]
    pub async fn post_message(&self, posted_by: i32, message_text: &str, time_posted_epoch: i64) -> Result<Message> {
        let result = self.create(posted_by, message_text, time_posted_epoch).await;

        match &result {
            Ok(message) => {
                tracing::Span::current().record("message_id", message.message_id);
                tracing::debug!("Message posted");
                self.metrics.messages_posted_total.add(1, &[KeyValue::new("status", "success")]);
            }
            Err(_) => {
                self.metrics.messages_posted_total.add(1, &[KeyValue::new("status", "failure")]);
            }
        }

        result
    }

    async fn create(&self, posted_by: i32, message_text: &str, time_posted_epoch: i64) -> Result<Message> {
        validate_text(message_text).map_err(AppError::BadRequest)?;

        if self.accounts.account_by_id(posted_by).await?.is_none() {
            return Err(AppError::BadRequest("posted_by does not reference an existing account".to_string()));
        }

        self.messages
            .insert_message(posted_by, message_text, time_posted_epoch)
            .await?
            .ok_or_else(|| AppError::BadRequest("Message could not be created".to_string()))
    }

    /// Replaces the text of an existing message. Author and timestamp are kept.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the message does not exist or the new text is invalid.
    #[tracing::instrument(err(level = "warn"), skip(self, message_text), fields(message_id = %message_id))]
    pub async fn update_message(&self, message_id: i32, message_text: &str) -> Result<Message> {
        if self.messages.message_by_id(message_id).await?.is_none() {
            return Err(AppError::BadRequest("Message not found".to_string()));
        }

        validate_text(message_text).map_err(AppError::BadRequest)?;

        self.messages.update_message_text(message_id, message_text).await?;

        let message = self
            .messages
            .message_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Message not found".to_string()))?;

        tracing::debug!("Message updated");
        Ok(message)
    }

    /// Removes a message, returning it as it was just before deletion.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store fails.
    #[tracing::instrument(err(level = "warn"), skip(self), fields(message_id = %message_id))]
    pub async fn delete_message(&self, message_id: i32) -> Result<Option<Message>> {
        let deleted = self.messages.delete_message(message_id).await?;

        if deleted.is_some() {
            tracing::debug!("Message deleted");
            self.metrics.messages_deleted_total.add(1, &[]);
        } else {
            tracing::debug!("Message to delete was not found");
        }

        Ok(deleted)
    }
}
