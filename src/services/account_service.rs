use crate::domain::account::{Account, validate_credentials};
use crate::error::{AppError, Result};
use crate::storage::AccountStore;
use opentelemetry::{
    KeyValue, global,
    metrics::Counter,
};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Metrics {
    accounts_registered_total: Counter<u64>,
    logins_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("social-media-api");
        Self {
            accounts_registered_total: meter
                .u64_counter("accounts_registered_total")
                .with_description("Total number of successful account registrations")
                .build(),
            logins_total: meter
                .u64_counter("logins_total")
                .with_description("Total number of login attempts")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    metrics: Metrics,
}

impl AccountService {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// # Errors
    /// Returns `AppError::Database` if the store cannot be read.
    pub async fn all_accounts(&self) -> Result<Vec<Account>> {
        self.store.all_accounts().await
    }

    /// # Errors
    /// Returns `AppError::Database` if the store cannot be read.
    pub async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>> {
        self.store.account_by_id(account_id).await
    }

    /// Creates an account after checking the credential rules and that the
    /// username is still free.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if validation fails, the username is taken,
    /// or the store refuses the insert.
    #[tracing::instrument(
        skip(self, password),
        fields(account_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn register(&self, username: &str, password: &str) -> Result<Account> {
        validate_credentials(username, password).map_err(AppError::BadRequest)?;

        if self.store.account_by_username(username).await?.is_some() {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        let Some(account) = self.store.insert_account(username, password).await? else {
            return Err(AppError::BadRequest("Account could not be created".to_string()));
        };

        tracing::Span::current().record("account_id", account.account_id);
        tracing::info!("Account registered");
        self.metrics.accounts_registered_total.add(1, &[]);

        Ok(account)
    }

    /// Returns the stored account when the password matches exactly.
    ///
    /// # Errors
    /// Returns `AppError::AuthError` if the username is unknown or the password differs.
    #[tracing::instrument(
        skip(self, password),
        fields(account_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn login(&self, username: &str, password: &str) -> Result<Account> {
        let Some(account) = self.store.account_by_username(username).await? else {
            tracing::warn!("Login failed: account not found");
            self.metrics.logins_total.add(1, &[KeyValue::new("status", "failure")]);
            return Err(AppError::AuthError);
        };

        tracing::Span::current().record("account_id", account.account_id);

        if !account.password_matches(password) {
            tracing::warn!("Login failed: invalid password");
            self.metrics.logins_total.add(1, &[KeyValue::new("status", "failure")]);
            return Err(AppError::AuthError);
        }

        tracing::info!("Account logged in");
        self.metrics.logins_total.add(1, &[KeyValue::new("status", "success")]);

        Ok(account)
    }

    /// Replaces username and password of an existing account and returns the
    /// refreshed row.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the account does not exist, the new
    /// credentials are invalid, or the username belongs to another account.
    #[tracing::instrument(skip(self, password), fields(account_id = %account_id), err(level = "warn"))]
    pub async fn update_account(&self, account_id: i32, username: &str, password: &str) -> Result<Account> {
        if self.store.account_by_id(account_id).await?.is_none() {
            return Err(AppError::BadRequest("Account not found".to_string()));
        }

        validate_credentials(username, password).map_err(AppError::BadRequest)?;

        match self.store.account_by_username(username).await? {
            Some(owner) if owner.account_id != account_id => {
                return Err(AppError::BadRequest("Username already exists".to_string()));
            }
            _ => {}
        }

        self.store.update_account(account_id, username, password).await?;

        let account = self
            .store
            .account_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Account not found".to_string()))?;

        tracing::info!("Account updated");
        Ok(account)
    }
}
