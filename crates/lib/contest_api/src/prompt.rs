//! System prompt and message mapping for the relay.

use serde_json::Value;

use crate::completion::{ChatRole, ChatTurn};
use crate::models::RelayMessage;

const PROMPT_INTRO: &str = "You are a helpful AI assistant specializing in parking ticket contests. \nYour goal is to help users contest their parking tickets effectively.";

const PROMPT_GUIDELINES: &str = "Guidelines:
- Be professional and courteous
- Ask for specific details about the ticket and situation
- Guide users through providing evidence
- Suggest relevant contest reasons based on their responses
- Help formulate clear and compelling arguments";

/// The fixed system prompt with `ticket` embedded as pretty JSON, keys and
/// numbers as received.
pub fn system_prompt(ticket: &Value) -> Result<String, serde_json::Error> {
    let ticket_json = serde_json::to_string_pretty(ticket)?;
    Ok(format!(
        "{PROMPT_INTRO}\n\nCurrent ticket information:\n{ticket_json}\n\n{PROMPT_GUIDELINES}"
    ))
}

/// `user` messages keep their role; every other type is sent as `assistant`.
pub fn role_for(kind: &str) -> ChatRole {
    if kind == "user" {
        ChatRole::User
    } else {
        ChatRole::Assistant
    }
}

/// Upstream turns: the system prompt followed by the mapped conversation.
pub fn build_turns(
    ticket: &Value,
    messages: &[RelayMessage],
) -> Result<Vec<ChatTurn>, serde_json::Error> {
    let mut turns = Vec::with_capacity(messages.len() + 1);
    turns.push(ChatTurn::new(ChatRole::System, system_prompt(ticket)?));
    turns.extend(
        messages
            .iter()
            .map(|m| ChatTurn::new(role_for(&m.kind), m.content.clone())),
    );
    Ok(turns)
}
