//! # contest_core
//!
//! Core session logic for the parking ticket contest wizard: domain models,
//! the contest-reason catalog, the form session, validation gates, and the
//! responder/submission seams.

pub mod command;
pub mod dispatch;
pub mod manager;
pub mod models;
pub mod reasons;
pub mod responder;
pub mod session;
pub mod submission;
pub mod uuid;
pub mod validation;

pub use manager::SessionManager;
pub use session::{Pending, Session};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
