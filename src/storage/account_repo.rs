use crate::domain::account::Account;
use crate::error::Result;
use crate::storage::records::AccountRecord;
use crate::storage::{AccountStore, DbPool};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub struct AccountRepository {
    pool: DbPool,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn all_accounts(&self) -> Result<Vec<Account>> {
        let records = sqlx::query_as::<_, AccountRecord>(
            r"
            SELECT account_id, username, password
            FROM account
            ORDER BY account_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, AccountRecord>(
            r"
            INSERT INTO account (username, password)
            VALUES ($1, $2)
            RETURNING account_id, username, password
            ",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(Some(record.into())),
            Err(e) => {
                tracing::warn!(error = %e, "Account insert rejected");
                Ok(None)
            }
        }
    }

    async fn account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r"
            SELECT account_id, username, password
            FROM account
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r"
            SELECT account_id, username, password
            FROM account
            WHERE account_id = $1
            ",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn update_account(&self, account_id: i32, username: &str, password: &str) -> Result<()> {
        sqlx::query("UPDATE account SET username = $1, password = $2 WHERE account_id = $3")
            .bind(username)
            .bind(password)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
