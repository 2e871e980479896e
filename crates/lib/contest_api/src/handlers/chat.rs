//! Chat relay handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::{info, warn};

use crate::AppState;
use crate::error::RelayError;
use crate::models::{ChatRelayRequest, ChatRelayResponse};
use crate::prompt;

/// `POST /functions/v1/chat`: forward the conversation upstream and return
/// the first completion. Every failure, including a malformed body, is a 500.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRelayRequest>, JsonRejection>,
) -> Result<Json<ChatRelayResponse>, RelayError> {
    let Json(body) = payload.map_err(|e| {
        warn!("rejected relay body: {e}");
        RelayError(e.body_text())
    })?;

    let turns = prompt::build_turns(&body.ticket_info, &body.messages)?;
    info!(
        messages = body.messages.len(),
        model = %state.config.openai_model,
        "relaying chat request"
    );

    let response = state.completion.complete(&turns).await.map_err(|e| {
        warn!("upstream completion failed: {e}");
        RelayError::from(e)
    })?;

    Ok(Json(ChatRelayResponse { response }))
}
