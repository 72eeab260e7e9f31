use crate::api::AppState;
use crate::api::middleware::{IdPath, JsonBody};
use crate::api::schemas::message::{Message, MessageUpdate, NewMessage};
use crate::domain::message::Message as MessageModel;
use crate::error::Result;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let messages = state.message_service.all_messages().await?;
    Ok(Json(messages.into_iter().map(Message::from).collect::<Vec<_>>()))
}

/// Lists messages posted by an account. Unknown accounts yield an empty list.
pub async fn list_account_messages(
    State(state): State<AppState>,
    IdPath(account_id): IdPath<i32>,
) -> Result<impl IntoResponse> {
    let messages = state.message_service.messages_by_account(account_id).await?;
    Ok(Json(messages.into_iter().map(Message::from).collect::<Vec<_>>()))
}

/// Fetches a single message. A missing message is a 200 with an empty body.
pub async fn get_message(State(state): State<AppState>, IdPath(message_id): IdPath<i32>) -> Result<Response> {
    let message = state.message_service.message_by_id(message_id).await?;
    Ok(message_or_empty(message))
}

/// # Errors
/// Returns `AppError::BadRequest` if the text is invalid or `posted_by` is not an existing account.
pub async fn create_message(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewMessage>,
) -> Result<impl IntoResponse> {
    let message = state
        .message_service
        .post_message(payload.posted_by, &payload.message_text, payload.time_posted_epoch)
        .await?;
    Ok(Json(Message::from(message)))
}

/// # Errors
/// Returns `AppError::BadRequest` if the message does not exist or the new text is invalid.
pub async fn update_message(
    State(state): State<AppState>,
    IdPath(message_id): IdPath<i32>,
    JsonBody(payload): JsonBody<MessageUpdate>,
) -> Result<impl IntoResponse> {
    let message = state.message_service.update_message(message_id, &payload.message_text).await?;
    Ok(Json(Message::from(message)))
}

/// Deletes a message and echoes it back; deleting a missing message is a 200 with an empty body.
pub async fn delete_message(State(state): State<AppState>, IdPath(message_id): IdPath<i32>) -> Result<Response> {
    let deleted = state.message_service.delete_message(message_id).await?;
    Ok(message_or_empty(deleted))
}

fn message_or_empty(message: Option<MessageModel>) -> Response {
    message.map_or_else(|| StatusCode::OK.into_response(), |m| Json(Message::from(m)).into_response())
}
