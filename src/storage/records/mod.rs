pub(crate) mod account;
pub(crate) mod message;

pub(crate) use account::AccountRecord;
pub(crate) use message::MessageRecord;
