use crate::api::AppState;
use crate::api::middleware::{IdPath, JsonBody};
use crate::api::schemas::account::{Account, Credentials};
use crate::error::Result;
use axum::{Json, extract::State, response::IntoResponse};

pub async fn list_accounts(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let accounts = state.account_service.all_accounts().await?;
    Ok(Json(accounts.into_iter().map(Account::from).collect::<Vec<_>>()))
}

/// Registers a new account.
///
/// # Errors
/// Returns `AppError::BadRequest` if the username is blank or taken, or the password is too short.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Credentials>,
) -> Result<impl IntoResponse> {
    let account = state.account_service.register(&payload.username, &payload.password).await?;
    Ok(Json(Account::from(account)))
}

/// # Errors
/// Returns `AppError::AuthError` if the credentials do not match a stored account.
pub async fn login(State(state): State<AppState>, JsonBody(payload): JsonBody<Credentials>) -> Result<impl IntoResponse> {
    let account = state.account_service.login(&payload.username, &payload.password).await?;
    Ok(Json(Account::from(account)))
}

/// # Errors
/// Returns `AppError::BadRequest` if the account does not exist or the new credentials are invalid.
pub async fn update_account(
    State(state): State<AppState>,
    IdPath(account_id): IdPath<i32>,
    JsonBody(payload): JsonBody<Credentials>,
) -> Result<impl IntoResponse> {
    let account = state.account_service.update_account(account_id, &payload.username, &payload.password).await?;
    Ok(Json(Account::from(account)))
}
