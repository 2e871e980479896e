//! Responder seam: the external chat-completion service behind assistant
//! replies.
//!
//! Session operations never call a responder themselves. They hand back
//! [`ChatRequest`] values; the caller runs them (directly via [`run`], or
//! through a [`crate::dispatch::ChatDispatcher`]) and feeds the resulting
//! [`ChatReply`] back into the session.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::{Message, Ticket};

pub use http::{HttpResponder, ResponderConfig};

/// Errors a responder can signal. All of them surface to the user as the
/// same apology message.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Relay returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Produces assistant replies from the conversation so far.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Reply to `history` (which ends with the triggering user message),
    /// given the current ticket snapshot.
    async fn respond(&self, history: &[Message], ticket: &Ticket) -> Result<String, ResponderError>;
}

/// Responder used when no chat relay is configured. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledResponder;

#[async_trait]
impl Responder for DisabledResponder {
    async fn respond(&self, _history: &[Message], _ticket: &Ticket) -> Result<String, ResponderError> {
        Err(ResponderError::Config("chat relay is not configured".into()))
    }
}

/// Snapshot handed to a responder after a user-role message is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Id of the user message that triggered the request.
    pub message_id: String,
    /// Full message log at the time of the append, ending with that message.
    pub history: Vec<Message>,
    pub ticket: Ticket,
}

/// Outcome of one [`ChatRequest`].
#[derive(Debug)]
pub struct ChatReply {
    pub message_id: String,
    pub outcome: Result<String, ResponderError>,
}

/// Run a single request to completion. Never retries.
pub async fn run(responder: &dyn Responder, request: &ChatRequest) -> ChatReply {
    let outcome = responder.respond(&request.history, &request.ticket).await;
    if let Err(e) = &outcome {
        warn!(message_id = %request.message_id, "responder failed: {e}");
    }
    ChatReply {
        message_id: request.message_id.clone(),
        outcome,
    }
}
