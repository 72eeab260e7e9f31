use crate::domain::account::Account;
use crate::domain::message::Message;
use crate::error::{AppError, Result};
use crate::storage::{AccountStore, MessageStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<i32, Account>,
    messages: BTreeMap<i32, Message>,
    last_account_id: i32,
    last_message_id: i32,
}

/// Process-local store implementing both table traits.
///
/// Mirrors the schema constraints of the SQL tables (unique usernames,
/// `posted_by` referencing an account) so it behaves like the database
/// when used in tests or when no database URL is configured.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| AppError::Internal)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn all_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.tables()?.accounts.values().cloned().collect())
    }

    async fn insert_account(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let mut tables = self.tables()?;
        if tables.accounts.values().any(|a| a.username == username) {
            tracing::warn!("Account insert rejected: duplicate username");
            return Ok(None);
        }

        tables.last_account_id += 1;
        let account =
            Account { account_id: tables.last_account_id, username: username.to_string(), password: password.to_string() };
        tables.accounts.insert(account.account_id, account.clone());
        Ok(Some(account))
    }

    async fn account_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.tables()?.accounts.values().find(|a| a.username == username).cloned())
    }

    async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>> {
        Ok(self.tables()?.accounts.get(&account_id).cloned())
    }

    async fn update_account(&self, account_id: i32, username: &str, password: &str) -> Result<()> {
        if let Some(account) = self.tables()?.accounts.get_mut(&account_id) {
            username.clone_into(&mut account.username);
            password.clone_into(&mut account.password);
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn all_messages(&self) -> Result<Vec<Message>> {
        Ok(self.tables()?.messages.values().cloned().collect())
    }

    async fn message_by_id(&self, message_id: i32) -> Result<Option<Message>> {
        Ok(self.tables()?.messages.get(&message_id).cloned())
    }

    async fn insert_message(
        &self,
        posted_by: i32,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<Option<Message>> {
        let mut tables = self.tables()?;
        if !tables.accounts.contains_key(&posted_by) {
            tracing::warn!(posted_by, "Message insert rejected: unknown account");
            return Ok(None);
        }

        tables.last_message_id += 1;
        let message = Message {
            message_id: tables.last_message_id,
            posted_by,
            message_text: message_text.to_string(),
            time_posted_epoch,
        };
        tables.messages.insert(message.message_id, message.clone());
        Ok(Some(message))
    }

    async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<()> {
        if let Some(message) = self.tables()?.messages.get_mut(&message_id) {
            message_text.clone_into(&mut message.message_text);
        }
        Ok(())
    }

    async fn delete_message(&self, message_id: i32) -> Result<Option<Message>> {
        Ok(self.tables()?.messages.remove(&message_id))
    }

    async fn messages_posted_by(&self, account_id: i32) -> Result<Vec<Message>> {
        Ok(self.tables()?.messages.values().filter(|m| m.posted_by == account_id).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_generated_sequentially() {
        let store = MemoryStore::new();
        let first = store.insert_account("alice", "password").await.unwrap().unwrap();
        let second = store.insert_account("bob", "password").await.unwrap().unwrap();
        assert_eq!(first.account_id, 1);
        assert_eq!(second.account_id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_insert_is_absent() {
        let store = MemoryStore::new();
        assert!(store.insert_account("alice", "password").await.unwrap().is_some());
        assert!(store.insert_account("alice", "other").await.unwrap().is_none());
        assert_eq!(store.all_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_message_requires_existing_author() {
        let store = MemoryStore::new();
        assert!(store.insert_message(42, "hello", 1).await.unwrap().is_none());

        let account = store.insert_account("alice", "password").await.unwrap().unwrap();
        let message = store.insert_message(account.account_id, "hello", 1).await.unwrap().unwrap();
        assert_eq!(message.posted_by, account.account_id);
    }

    #[tokio::test]
    async fn test_delete_returns_previous_row_once() {
        let store = MemoryStore::new();
        let account = store.insert_account("alice", "password").await.unwrap().unwrap();
        let message = store.insert_message(account.account_id, "hello", 7).await.unwrap().unwrap();

        assert_eq!(store.delete_message(message.message_id).await.unwrap(), Some(message.clone()));
        assert_eq!(store.delete_message(message.message_id).await.unwrap(), None);
        assert!(store.message_by_id(message.message_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_of_missing_rows_is_a_no_op() {
        let store = MemoryStore::new();
        store.update_account(9, "ghost", "password").await.unwrap();
        store.update_message_text(9, "ghost").await.unwrap();
        assert!(store.all_accounts().await.unwrap().is_empty());
        assert!(store.all_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_messages_posted_by_filters_on_author() {
        let store = MemoryStore::new();
        let alice = store.insert_account("alice", "password").await.unwrap().unwrap();
        let bob = store.insert_account("bob", "password").await.unwrap().unwrap();
        store.insert_message(alice.account_id, "one", 1).await.unwrap();
        store.insert_message(bob.account_id, "two", 2).await.unwrap();
        store.insert_message(alice.account_id, "three", 3).await.unwrap();

        let texts: Vec<_> =
            store.messages_posted_by(alice.account_id).await.unwrap().into_iter().map(|m| m.message_text).collect();
        assert_eq!(texts, vec!["one", "three"]);
        assert!(store.messages_posted_by(99).await.unwrap().is_empty());
    }
}
