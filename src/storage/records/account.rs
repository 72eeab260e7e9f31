use crate::domain::account::Account;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AccountRecord {
    pub(crate) account_id: i32,
    pub(crate) username: String,
    pub(crate) password: String,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self { account_id: record.account_id, username: record.username, password: record.password }
    }
}
