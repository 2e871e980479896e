//! Conversational log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::uuid::message_id;

/// Id of the seeded welcome message.
pub const WELCOME_ID: &str = "welcome";

const WELCOME_TEXT: &str = "Hi! I'm here to help you contest your parking ticket. Let's start by gathering some information about the ticket. What's the ticket number?";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traceability data attached to a message. Never read for control flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_id: Option<String>,
}

/// A stamped entry in the session's message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    /// The seed entry every session starts with.
    pub fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            role: Role::System,
            content: WELCOME_TEXT.to_string(),
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    /// Assign an id and timestamp to a draft message.
    pub fn stamp(draft: NewMessage) -> Self {
        Self {
            id: message_id(),
            role: draft.role,
            content: draft.content,
            timestamp: Utc::now(),
            metadata: draft.metadata,
        }
    }

    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_ID
    }
}

/// A message before it is stamped and appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl NewMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            metadata: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.metadata.get_or_insert_with(MessageMetadata::default).field = Some(field.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.metadata.get_or_insert_with(MessageMetadata::default).value = Some(value.into());
        self
    }

    pub fn with_evidence(mut self, evidence_id: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(MessageMetadata::default)
            .evidence_id = Some(evidence_id.into());
        self
    }
}
