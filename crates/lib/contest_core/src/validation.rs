//! Step gates applied before the wizard advances.
//!
//! Session operations never validate. Callers check the current step here
//! and only then move on, so a session can hold incomplete data without
//! error.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{ContactInfo, Step, Ticket};
use crate::session::Session;

/// Custom justifications must be longer than this, after trimming.
pub const MIN_CUSTOM_REASON_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ticket field `{0}` is required")]
    MissingTicketField(&'static str),

    #[error("Fine amount must be greater than zero")]
    InvalidAmount,

    #[error("A contest reason must be selected")]
    NoReasonSelected,

    #[error("Custom reason must be longer than {min} characters")]
    CustomReasonTooShort { min: usize },

    #[error("Contact field `{0}` is required")]
    MissingContactField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("`{0}` is the final step")]
    FinalStep(Step),
}

pub type ValidationResult = Result<(), ValidationError>;

fn require(value: &str, name: &'static str, err: fn(&'static str) -> ValidationError) -> ValidationResult {
    if value.trim().is_empty() {
        Err(err(name))
    } else {
        Ok(())
    }
}

/// All six ticket fields present, amount positive.
pub fn check_ticket(ticket: &Ticket) -> ValidationResult {
    let missing = ValidationError::MissingTicketField;
    require(&ticket.ticket_number, "ticketNumber", missing)?;
    require(&ticket.issue_date, "issueDate", missing)?;
    require(&ticket.license_plate, "licensePlate", missing)?;
    require(&ticket.violation, "violation", missing)?;
    require(&ticket.location, "location", missing)?;
    // NaN fails this comparison too.
    if !(ticket.amount > 0.0) {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(())
}

/// A reason is selected; the custom reason needs a long enough justification.
pub fn check_reason(session: &Session) -> ValidationResult {
    let reason = session
        .selected_reason
        .as_ref()
        .ok_or(ValidationError::NoReasonSelected)?;
    if reason.is_custom() && session.custom_reason.trim().chars().count() <= MIN_CUSTOM_REASON_CHARS {
        return Err(ValidationError::CustomReasonTooShort {
            min: MIN_CUSTOM_REASON_CHARS,
        });
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Name, email and phone present; email well-formed.
pub fn check_contact(contact: &ContactInfo) -> ValidationResult {
    let missing = ValidationError::MissingContactField;
    require(&contact.name, "name", missing)?;
    require(&contact.email, "email", missing)?;
    if !is_valid_email(&contact.email) {
        return Err(ValidationError::InvalidEmail(contact.email.clone()));
    }
    require(&contact.phone, "phone", missing)?;
    Ok(())
}

/// Whether the session may leave its current step.
pub fn check_step(session: &Session) -> ValidationResult {
    match session.current_step {
        Step::TicketInfo => check_ticket(&session.ticket),
        Step::ContestReason => check_reason(session),
        Step::Evidence => Ok(()),
        Step::Review => check_contact(&session.contact_info),
        Step::Confirmation => Err(ValidationError::FinalStep(Step::Confirmation)),
    }
}

/// Check the current step and move to the next one.
pub fn advance(session: &mut Session) -> Result<Step, ValidationError> {
    check_step(session)?;
    let next = session
        .current_step
        .next()
        .ok_or(ValidationError::FinalStep(session.current_step))?;
    session.go_to_step(next);
    Ok(next)
}
