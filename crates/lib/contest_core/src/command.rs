//! Session commands: every session operation as a serializable value.
//!
//! Scripts (see the `contest replay` CLI) are lists of these, tagged by
//! `op`:
//!
//! ```yaml
//! - op: updateTicket
//!   ticketNumber: TC-123
//! - op: selectReason
//!   id: meter-malfunction
//! - op: advance
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::manager::SessionManager;
use crate::models::{
    ContactUpdate, Evidence, EvidenceFile, EvidenceUpdate, NewMessage, Step, TicketUpdate,
};
use crate::reasons;
use crate::session::{Pending, Session};
use crate::submission::SubmissionError;
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SessionCommand {
    UpdateTicket(TicketUpdate),
    UpdateContact(ContactUpdate),
    /// Select a catalog reason by id, or clear the selection.
    SelectReason {
        #[serde(default)]
        id: Option<String>,
    },
    CustomReason {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    AddEvidence {
        /// Caller-chosen id, so later commands can refer to the item.
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        mime_type: String,
        #[serde(default)]
        size: u64,
        #[serde(default)]
        description: String,
    },
    RemoveEvidence {
        id: String,
    },
    UpdateEvidence {
        id: String,
        description: String,
    },
    /// A free-form user chat message.
    Say {
        text: String,
    },
    /// Validate the current step, then move to the next.
    Advance,
    GoToStep {
        step: Step,
    },
    Submit,
    Reset,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown contest reason: {0}")]
    UnknownReason(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl SessionCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::UpdateTicket(_) => "updateTicket",
            SessionCommand::UpdateContact(_) => "updateContact",
            SessionCommand::SelectReason { .. } => "selectReason",
            SessionCommand::CustomReason { .. } => "customReason",
            SessionCommand::AddEvidence { .. } => "addEvidence",
            SessionCommand::RemoveEvidence { .. } => "removeEvidence",
            SessionCommand::UpdateEvidence { .. } => "updateEvidence",
            SessionCommand::Say { .. } => "say",
            SessionCommand::Advance => "advance",
            SessionCommand::GoToStep { .. } => "goToStep",
            SessionCommand::Submit => "submit",
            SessionCommand::Reset => "reset",
        }
    }
}

impl SessionManager {
    /// Apply one command to `session`, returning the chat requests it
    /// produced. Chat requests are not run here.
    pub async fn execute(
        &self,
        session: &mut Session,
        command: SessionCommand,
    ) -> Result<Pending, CommandError> {
        debug!(op = command.name(), "executing session command");
        let pending = match command {
            SessionCommand::UpdateTicket(update) => session.update_ticket(update),
            SessionCommand::UpdateContact(update) => {
                session.update_contact(update);
                Pending::default()
            }
            SessionCommand::SelectReason { id: None } => session.set_selected_reason(None),
            SessionCommand::SelectReason { id: Some(id) } => {
                let reason = reasons::find(&id).ok_or(CommandError::UnknownReason(id))?;
                session.set_selected_reason(Some(reason))
            }
            SessionCommand::CustomReason { text } => session.set_custom_reason(text),
            SessionCommand::AddEvidence {
                id,
                name,
                mime_type,
                size,
                description,
            } => {
                let file = name.map(|name| EvidenceFile {
                    name,
                    mime_type,
                    size,
                });
                let evidence = match id {
                    Some(id) => Evidence::with_id(id, file, description),
                    None => Evidence::from_upload(file, description),
                };
                session.add_evidence(evidence)
            }
            SessionCommand::RemoveEvidence { id } => {
                session.remove_evidence(&id);
                Pending::default()
            }
            SessionCommand::UpdateEvidence { id, description } => {
                session.update_evidence(&id, EvidenceUpdate::description(description))
            }
            SessionCommand::Say { text } => session.add_message(NewMessage::user(text)),
            SessionCommand::Advance => {
                validation::advance(session)?;
                Pending::default()
            }
            SessionCommand::GoToStep { step } => {
                session.go_to_step(step);
                Pending::default()
            }
            SessionCommand::Submit => {
                self.submit(session).await?;
                Pending::default()
            }
            SessionCommand::Reset => {
                session.reset();
                Pending::default()
            }
        };
        Ok(pending)
    }
}
