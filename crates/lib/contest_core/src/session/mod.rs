//! Form session: the state of one user's in-progress ticket contest.
//!
//! A [`Session`] is a plain value owned by the caller. Every operation mutates
//! it synchronously and appends conversational log entries; operations that
//! append a user-role message also return the [`ChatRequest`]s the caller is
//! expected to run against a responder (see [`Pending`]).
//!
//! The session never enforces step order. Callers gate advancement with
//! [`crate::validation`] and then move the step with [`Session::go_to_step`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    ContactInfo, ContactUpdate, ContestReason, Evidence, EvidenceUpdate, Message, NewMessage,
    Role, Step, Ticket, TicketUpdate,
};
use crate::responder::{ChatReply, ChatRequest};
use crate::submission::SubmissionError;

const EVIDENCE_PROMPT: &str = "Great choice. Now, let's gather some evidence to support your case. You can upload photos or documents that help prove your point.";
const RESPONDER_APOLOGY: &str =
    "Sorry, I encountered an error processing your message. Please try again.";
const SUBMISSION_APOLOGY: &str = "Sorry, we could not submit your contest. Please try again.";

/// Chat requests produced by a session operation, one per user-role message
/// appended.
#[derive(Debug, Default)]
#[must_use = "pending chat requests should be dispatched or dropped explicitly"]
pub struct Pending {
    requests: Vec<ChatRequest>,
}

impl Pending {
    pub fn requests(&self) -> &[ChatRequest] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<ChatRequest> {
        self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn push(&mut self, request: Option<ChatRequest>) {
        self.requests.extend(request);
    }
}

impl IntoIterator for Pending {
    type Item = ChatRequest;
    type IntoIter = std::vec::IntoIter<ChatRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}

/// The full record of one ticket contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_step: Step,
    pub ticket: Ticket,
    pub selected_reason: Option<ContestReason>,
    pub custom_reason: String,
    pub evidence: Vec<Evidence>,
    pub contact_info: ContactInfo,
    messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submission_id: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Initial session: ticket-info step, empty fields, one welcome message.
    pub fn new() -> Self {
        Self {
            current_step: Step::TicketInfo,
            ticket: Ticket::default(),
            selected_reason: None,
            custom_reason: String::new(),
            evidence: Vec::new(),
            contact_info: ContactInfo::default(),
            messages: vec![Message::welcome()],
            submission_id: None,
        }
    }

    /// The message log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn submission_id(&self) -> Option<&str> {
        self.submission_id.as_deref()
    }

    pub fn find_evidence(&self, id: &str) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id == id)
    }

    /// Replace the whole session with the initial one.
    pub fn reset(&mut self) {
        debug!("resetting session");
        *self = Self::new();
    }

    /// Stamp and append a message. User-role messages yield a chat request
    /// carrying the log as it stands after the append.
    fn push(&mut self, draft: NewMessage) -> Option<ChatRequest> {
        let message = Message::stamp(draft);
        debug!(id = %message.id, role = %message.role, "appending message");
        let is_user = message.role == Role::User;
        let message_id = message.id.clone();
        self.messages.push(message);
        is_user.then(|| ChatRequest {
            message_id,
            history: self.messages.clone(),
            ticket: self.ticket.clone(),
        })
    }

    /// Append an arbitrary message.
    pub fn add_message(&mut self, message: NewMessage) -> Pending {
        let mut pending = Pending::default();
        pending.push(self.push(message));
        pending
    }

    /// Merge ticket fields. The first set field (in collection order) is
    /// echoed as a user message, followed by the prompt for the next field.
    /// A blank first value merges without any messages.
    pub fn update_ticket(&mut self, update: TicketUpdate) -> Pending {
        update.apply_to(&mut self.ticket);

        let mut pending = Pending::default();
        let Some((field, value)) = update.first_value() else {
            return pending;
        };

        pending.push(
            self.push(
                NewMessage::user(value.clone())
                    .with_field(field.as_str())
                    .with_value(value),
            ),
        );
        if let Some(next) = field.next() {
            pending.push(self.push(NewMessage::assistant(next.prompt()).with_field(next.as_str())));
        }
        pending
    }

    /// Merge contact details. Appends no messages.
    pub fn update_contact(&mut self, update: ContactUpdate) {
        update.apply_to(&mut self.contact_info);
    }

    /// Replace the selected reason. A non-null selection is echoed and
    /// answered with the evidence-stage prompt.
    pub fn set_selected_reason(&mut self, reason: Option<ContestReason>) -> Pending {
        let mut pending = Pending::default();
        if let Some(reason) = &reason {
            pending.push(
                self.push(
                    NewMessage::user(format!(
                        "I want to contest this ticket because: {}",
                        reason.title
                    ))
                    .with_field("contestReason")
                    .with_value(reason.id.clone()),
                ),
            );
            pending.push(self.push(NewMessage::assistant(EVIDENCE_PROMPT).with_field("evidence")));
        }
        self.selected_reason = reason;
        pending
    }

    /// Replace the free-text justification; non-empty text is echoed verbatim.
    pub fn set_custom_reason(&mut self, text: impl Into<String>) -> Pending {
        self.custom_reason = text.into();
        let mut pending = Pending::default();
        if !self.custom_reason.is_empty() {
            pending.push(
                self.push(NewMessage::user(self.custom_reason.clone()).with_field("customReason")),
            );
        }
        pending
    }

    /// Append an evidence item and announce the upload.
    pub fn add_evidence(&mut self, evidence: Evidence) -> Pending {
        let id = evidence.id.clone();
        let name = evidence.file_name().to_string();
        let description = evidence.description.clone();
        self.evidence.push(evidence);

        let mut pending = Pending::default();
        pending.push(
            self.push(
                NewMessage::user(format!("Uploaded evidence: {name}"))
                    .with_field("evidence")
                    .with_evidence(id.clone()),
            ),
        );
        if !description.is_empty() {
            pending.push(
                self.push(
                    NewMessage::user(format!("Description: {description}"))
                        .with_field("evidenceDescription")
                        .with_evidence(id),
                ),
            );
        }
        pending
    }

    /// Remove an evidence item by id. Returns `false`, and changes nothing,
    /// when no item has that id.
    pub fn remove_evidence(&mut self, id: &str) -> bool {
        let before = self.evidence.len();
        self.evidence.retain(|e| e.id != id);
        if self.evidence.len() == before {
            debug!(evidence_id = id, "remove ignored, no such evidence");
            return false;
        }
        self.push(
            NewMessage::system("Evidence removed.")
                .with_field("evidenceRemoved")
                .with_evidence(id),
        );
        true
    }

    /// Merge into the matching evidence item; a non-empty new description is
    /// echoed. Unknown ids are ignored.
    pub fn update_evidence(&mut self, id: &str, update: EvidenceUpdate) -> Pending {
        let mut pending = Pending::default();
        let Some(evidence) = self.evidence.iter_mut().find(|e| e.id == id) else {
            debug!(evidence_id = id, "update ignored, no such evidence");
            return pending;
        };
        update.apply_to(evidence);

        if let Some(description) = update.description.filter(|d| !d.is_empty()) {
            pending.push(
                self.push(
                    NewMessage::user(format!("Updated evidence description: {description}"))
                        .with_field("evidenceDescription")
                        .with_evidence(id),
                ),
            );
        }
        pending
    }

    /// Move to `step` unconditionally.
    pub fn go_to_step(&mut self, step: Step) {
        debug!(from = %self.current_step, to = %step, "changing step");
        self.current_step = step;
    }

    /// Append the outcome of a chat request: the reply as an assistant
    /// message, or one apology on failure. Blank replies append nothing.
    pub fn apply_reply(&mut self, reply: ChatReply) {
        match reply.outcome {
            Ok(text) if text.trim().is_empty() => {
                debug!(message_id = %reply.message_id, "blank reply dropped");
            }
            Ok(text) => {
                self.push(NewMessage::assistant(text));
            }
            Err(_) => {
                self.push(NewMessage::system(RESPONDER_APOLOGY));
            }
        }
    }

    /// Log the start of a submission.
    pub fn begin_submission(&mut self) {
        self.push(NewMessage::system("Submitting your contest...").with_field("submitting"));
    }

    /// Record a successful submission and move to the confirmation step.
    pub fn complete_submission(&mut self, submission_id: impl Into<String>) {
        let submission_id = submission_id.into();
        self.current_step = Step::Confirmation;
        self.push(
            NewMessage::system(format!(
                "Contest submitted successfully! Your submission ID is {submission_id}"
            ))
            .with_field("submitted")
            .with_value(submission_id.clone()),
        );
        self.submission_id = Some(submission_id);
    }

    /// Log a failed submission. The step is left unchanged.
    pub fn fail_submission(&mut self, error: &SubmissionError) {
        debug!("submission failed: {error}");
        self.push(NewMessage::system(SUBMISSION_APOLOGY).with_field("submissionFailed"));
    }
}

#[cfg(test)]
mod tests;
