//! # contest_api
//!
//! HTTP chat relay for the ticket contest wizard: turns `{ messages,
//! ticketInfo }` into an upstream chat completion and answers with
//! `{ response }`.

pub mod completion;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::completion::{CompletionBackend, OpenAiCompletion};
use crate::config::ApiConfig;
use crate::handlers::{chat, health, reasons};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Upstream chat completion backend.
    pub completion: Arc<dyn CompletionBackend>,
}

impl AppState {
    /// State backed by the OpenAI-compatible upstream described in `config`.
    pub fn from_config(config: ApiConfig) -> Self {
        let completion = Arc::new(OpenAiCompletion::from_config(&config));
        Self { config, completion }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::GET_REASONS, get(reasons::list_reasons_handler))
        .route(routes::GET_REASON, get(reasons::get_reason_handler))
        .layer(cors)
        .with_state(state)
}
