//! Wire types for the relay routes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /functions/v1/chat`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRelayRequest {
    pub messages: Vec<RelayMessage>,
    /// Ticket snapshot exactly as the client sent it; `null` when absent.
    #[serde(default)]
    pub ticket_info: Value,
}

/// One conversation entry as the client sends it. Only `type` and `content`
/// are read; ids, timestamps and metadata are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayMessage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRelayResponse {
    pub response: String,
}

/// Failure body of the relay route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayErrorResponse {
    pub error: String,
}

/// Error body of the other routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Upstream chat completion model the relay is configured for.
    pub model: String,
}
