use crate::config::DatabaseConfig;
use crate::domain::account::Account;
use crate::domain::message::Message;
use crate::error::Result;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub mod account_repo;
pub mod memory;
pub mod message_repo;
pub(crate) mod records;

pub use account_repo::AccountRepository;
pub use memory::MemoryStore;
pub use message_repo::MessageRepository;

pub type DbPool = Pool<Postgres>;

/// Row access for the `account` table.
///
/// Inserts never fail loudly: a rejected insert is logged and reported as
/// `Ok(None)`, so callers must treat absence as failure.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug {
    async fn all_accounts(&self) -> Result<Vec<Account>>;
    async fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>>;
    async fn account_by_username(&self, username: &str) -> Result<Option<Account>>;
    async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>>;
    /// Overwrites username and password. Success is observed by re-reading.
    async fn update_account(&self, account_id: i32, username: &str, password: &str) -> Result<()>;
}

/// Row access for the `message` table.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug {
    async fn all_messages(&self) -> Result<Vec<Message>>;
    async fn message_by_id(&self, message_id: i32) -> Result<Option<Message>>;
    async fn insert_message(
        &self,
        posted_by: i32,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<Option<Message>>;
    async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<()>;
    /// Removes the row and returns it as it was before deletion.
    async fn delete_message(&self, message_id: i32) -> Result<Option<Message>>;
    async fn messages_posted_by(&self, account_id: i32) -> Result<Vec<Message>>;
}

/// Initializes the database connection pool, retrying with exponential backoff.
///
/// # Errors
/// Returns `sqlx::Error` if the database stays unreachable after the configured retries.
pub async fn init_pool(database_url: &str, config: &DatabaseConfig) -> std::result::Result<DbPool, sqlx::Error> {
    let retry_strategy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(10))
        .with_max_times(config.connect_max_retries);

    (|| async { PgPoolOptions::new().max_connections(config.max_connections).connect(database_url).await })
        .retry(retry_strategy)
        .notify(|e, duration| {
            tracing::warn!(error = %e, retry_in = ?duration, "Failed to connect to database, retrying...");
        })
        .await
}
