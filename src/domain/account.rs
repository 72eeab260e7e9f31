/// Shortest password accepted at registration or update.
pub const MIN_PASSWORD_LEN: usize = 4;
/// Column width of `account.username` and `account.password`.
pub const MAX_CREDENTIAL_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: i32,
    pub username: String,
    pub password: String,
}

impl Account {
    /// Plaintext, case-sensitive comparison. Passwords are stored as given.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

/// Checks the field rules shared by registration and account updates.
///
/// # Errors
/// Returns a human readable reason when the username is blank, the
/// password is shorter than [`MIN_PASSWORD_LEN`] characters, or either
/// field exceeds [`MAX_CREDENTIAL_LEN`] characters.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username must not be blank".to_string());
    }
    if username.chars().count() > MAX_CREDENTIAL_LEN {
        return Err(format!("Username must be at most {MAX_CREDENTIAL_LEN} characters"));
    }
    let password_len = password.chars().count();
    if password_len < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if password_len > MAX_CREDENTIAL_LEN {
        return Err(format!("Password must be at most {MAX_CREDENTIAL_LEN} characters"));
    }
    Ok(())
}
