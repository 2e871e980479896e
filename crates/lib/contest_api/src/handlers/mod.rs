//! Request handlers.

pub mod chat;
pub mod health;
pub mod reasons;
