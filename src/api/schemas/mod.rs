pub mod account;
pub mod message;
