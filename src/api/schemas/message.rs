use crate::domain::message::Message as MessageModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NewMessage {
    pub posted_by: i32,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

/// Only the text of a message can change; any other fields in the body are ignored.
#[derive(Debug, Deserialize)]
pub struct MessageUpdate {
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i32,
    pub posted_by: i32,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl From<MessageModel> for Message {
    fn from(message: MessageModel) -> Self {
        Self {
            message_id: message.message_id,
            posted_by: message.posted_by,
            message_text: message.message_text,
            time_posted_epoch: message.time_posted_epoch,
        }
    }
}
