//! Submission seam: hands a finished contest to whatever processes it.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::info;

use crate::models::{ContactInfo, ContestReason, Evidence, Ticket};
use crate::session::Session;

/// Prefix of every submission id issued by [`MockSubmissionService`].
pub const SUBMISSION_ID_PREFIX: &str = "TC-";

/// Delay used by [`MockSubmissionService::default`].
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Submission service unavailable: {0}")]
    Unavailable(String),
}

/// Everything a contest needs, captured from a session at submit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestSubmission {
    pub ticket: Ticket,
    pub reason: Option<ContestReason>,
    /// The custom justification for the custom reason, otherwise the
    /// reason's template.
    pub statement: String,
    pub evidence: Vec<Evidence>,
    pub contact_info: ContactInfo,
}

impl ContestSubmission {
    pub fn from_session(session: &Session) -> Self {
        let statement = match &session.selected_reason {
            Some(reason) if reason.is_custom() => session.custom_reason.trim().to_string(),
            Some(reason) => reason.template.clone(),
            None => String::new(),
        };
        Self {
            ticket: session.ticket.clone(),
            reason: session.selected_reason.clone(),
            statement,
            evidence: session.evidence.clone(),
            contact_info: session.contact_info.clone(),
        }
    }
}

/// Accepts a contest and returns its submission id.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(&self, submission: &ContestSubmission) -> Result<String, SubmissionError>;
}

/// Stand-in backend: waits a fixed delay, then issues `TC-<0..1000000>`.
/// Never fails.
#[derive(Debug, Clone, Copy)]
pub struct MockSubmissionService {
    delay: Duration,
}

impl MockSubmissionService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockSubmissionService {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMISSION_DELAY)
    }
}

#[async_trait]
impl SubmissionService for MockSubmissionService {
    async fn submit(&self, submission: &ContestSubmission) -> Result<String, SubmissionError> {
        sleep(self.delay).await;
        let number: u32 = rand::rng().random_range(0..1_000_000);
        let id = format!("{SUBMISSION_ID_PREFIX}{number}");
        info!(
            submission_id = %id,
            ticket = %submission.ticket.ticket_number,
            evidence = submission.evidence.len(),
            "contest submitted"
        );
        Ok(id)
    }
}

/// Whether `id` looks like `TC-<digits>`.
pub fn is_submission_id(id: &str) -> bool {
    id.strip_prefix(SUBMISSION_ID_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
