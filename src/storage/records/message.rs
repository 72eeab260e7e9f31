use crate::domain::message::Message;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MessageRecord {
    pub(crate) message_id: i32,
    pub(crate) posted_by: i32,
    pub(crate) message_text: String,
    pub(crate) time_posted_epoch: i64,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            message_id: record.message_id,
            posted_by: record.posted_by,
            message_text: record.message_text,
            time_posted_epoch: record.time_posted_epoch,
        }
    }
}
