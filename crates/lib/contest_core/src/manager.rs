//! Session manager: binds a session to its responder and submission
//! service.
//!
//! The manager holds no session state itself; every call takes the caller's
//! [`Session`] explicitly.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::dispatch::{ChatDispatcher, DispatchMode};
use crate::models::NewMessage;
use crate::responder::{self, ChatReply, ChatRequest, Responder};
use crate::session::Session;
use crate::submission::{ContestSubmission, SubmissionError, SubmissionService};

#[derive(Clone)]
pub struct SessionManager {
    responder: Arc<dyn Responder>,
    submitter: Arc<dyn SubmissionService>,
}

impl SessionManager {
    pub fn new(responder: Arc<dyn Responder>, submitter: Arc<dyn SubmissionService>) -> Self {
        Self {
            responder,
            submitter,
        }
    }

    /// A background dispatcher sharing this manager's responder.
    pub fn dispatcher(
        &self,
        mode: DispatchMode,
    ) -> (ChatDispatcher, mpsc::UnboundedReceiver<ChatReply>) {
        ChatDispatcher::new(Arc::clone(&self.responder), mode)
    }

    /// Run one chat request and wait for its outcome.
    pub async fn respond(&self, request: &ChatRequest) -> ChatReply {
        responder::run(self.responder.as_ref(), request).await
    }

    /// Append `message` and, for a user message, wait for the responder and
    /// append its reply (or the apology).
    pub async fn add_message(&self, session: &mut Session, message: NewMessage) {
        for request in session.add_message(message) {
            let reply = self.respond(&request).await;
            session.apply_reply(reply);
        }
    }

    /// Submit the session's contest.
    ///
    /// Logs a "submitting" entry first; on success the session records the id
    /// and moves to the confirmation step, on failure it logs an apology and
    /// keeps its step.
    pub async fn submit(&self, session: &mut Session) -> Result<String, SubmissionError> {
        session.begin_submission();
        let submission = ContestSubmission::from_session(session);
        match self.submitter.submit(&submission).await {
            Ok(id) => {
                info!(submission_id = %id, "submission accepted");
                session.complete_submission(id.clone());
                Ok(id)
            }
            Err(e) => {
                warn!("submission failed: {e}");
                session.fail_submission(&e);
                Err(e)
            }
        }
    }
}
