use crate::domain::account::Account as AccountModel;
use serde::{Deserialize, Serialize};

/// Body of `POST /register`, `POST /login` and `PUT /accounts/{account_id}`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i32,
    pub username: String,
    pub password: String,
}

impl From<AccountModel> for Account {
    fn from(account: AccountModel) -> Self {
        Self { account_id: account.account_id, username: account.username, password: account.password }
    }
}
