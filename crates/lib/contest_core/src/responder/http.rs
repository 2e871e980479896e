//! HTTP responder: posts the conversation to the chat relay endpoint.
//!
//! Wire contract: `POST { messages, ticketInfo }`, answered with
//! `{ "response": "..." }` on success or `{ "error": "..." }` on failure.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Responder, ResponderError};
use crate::models::{Message, Ticket};

/// Where the relay lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    /// Full URL of the relay endpoint, e.g. `http://127.0.0.1:54321/functions/v1/chat`.
    pub relay_url: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
}

impl ResponderConfig {
    /// Reads `CHAT_RELAY_URL` (required) and `CHAT_RELAY_KEY` (optional).
    pub fn from_env() -> Result<Self, ResponderError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ResponderError> {
        let relay_url = lookup("CHAT_RELAY_URL")
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ResponderError::Config("CHAT_RELAY_URL is not set".into()))?;
        Ok(Self {
            relay_url,
            api_key: lookup("CHAT_RELAY_KEY").filter(|k| !k.is_empty()),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayRequest<'a> {
    messages: &'a [Message],
    ticket_info: &'a Ticket,
}

#[derive(Deserialize)]
struct RelayResponse {
    response: Option<String>,
    error: Option<String>,
}

/// [`Responder`] backed by the chat relay.
#[derive(Debug, Clone)]
pub struct HttpResponder {
    client: Client,
    config: ResponderConfig,
}

impl HttpResponder {
    /// Validates the relay URL (http or https) up front.
    pub fn new(config: ResponderConfig) -> Result<Self, ResponderError> {
        let url: url::Url = config
            .relay_url
            .parse()
            .map_err(|e| ResponderError::Config(format!("invalid relay URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResponderError::Config(format!(
                "relay URL must use http or https, got {}",
                url.scheme()
            )));
        }
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, history: &[Message], ticket: &Ticket) -> Result<String, ResponderError> {
        let mut request = self.client.post(&self.config.relay_url).json(&RelayRequest {
            messages: history,
            ticket_info: ticket,
        });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        debug!(url = %self.config.relay_url, messages = history.len(), "posting to chat relay");
        let resp = request
            .send()
            .await
            .map_err(|e| ResponderError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ResponderError::Transport(e.to_string()))?;

        let parsed = serde_json::from_str::<RelayResponse>(&body);
        if !status.is_success() {
            return Err(match parsed {
                Ok(RelayResponse { error: Some(error), .. }) => ResponderError::Relay(error),
                _ => ResponderError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        match parsed {
            Ok(RelayResponse { response: Some(text), .. }) => Ok(text),
            Ok(RelayResponse { error: Some(error), .. }) => Err(ResponderError::Relay(error)),
            Ok(_) => Err(ResponderError::Decode("relay reply has no `response` field".into())),
            Err(e) => Err(ResponderError::Decode(e.to_string())),
        }
    }
}
