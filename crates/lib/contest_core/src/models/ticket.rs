//! Ticket record and the fixed order in which its fields are collected.

use serde::{Deserialize, Serialize};

/// Details copied from the physical parking ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    pub ticket_number: String,
    pub issue_date: String,
    pub license_plate: String,
    pub violation: String,
    pub location: String,
    /// Fine amount; zero until the user enters one.
    pub amount: f64,
}

/// One of the six ticket fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TicketField {
    TicketNumber,
    IssueDate,
    LicensePlate,
    Violation,
    Location,
    Amount,
}

impl TicketField {
    /// Order in which the assistant prompts for ticket fields.
    pub const ORDER: [TicketField; 6] = [
        TicketField::TicketNumber,
        TicketField::IssueDate,
        TicketField::LicensePlate,
        TicketField::Violation,
        TicketField::Location,
        TicketField::Amount,
    ];

    /// Wire name of the field, as used in message metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketField::TicketNumber => "ticketNumber",
            TicketField::IssueDate => "issueDate",
            TicketField::LicensePlate => "licensePlate",
            TicketField::Violation => "violation",
            TicketField::Location => "location",
            TicketField::Amount => "amount",
        }
    }

    /// The field collected after this one, if any.
    pub fn next(self) -> Option<TicketField> {
        next_field(self)
    }

    /// Assistant prompt asking for this field.
    pub fn prompt(self) -> &'static str {
        match self {
            TicketField::TicketNumber => "What's the ticket number?",
            TicketField::IssueDate => "When was the ticket issued?",
            TicketField::LicensePlate => "What's your license plate number?",
            TicketField::Violation => "What violation were you cited for?",
            TicketField::Location => "Where did this occur?",
            TicketField::Amount => "What's the fine amount?",
        }
    }
}

impl std::fmt::Display for TicketField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure lookup over [`TicketField::ORDER`].
pub fn next_field(field: TicketField) -> Option<TicketField> {
    let index = TicketField::ORDER.iter().position(|f| *f == field)?;
    TicketField::ORDER.get(index + 1).copied()
}

/// Partial ticket update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketUpdate {
    pub ticket_number: Option<String>,
    pub issue_date: Option<String>,
    pub license_plate: Option<String>,
    pub violation: Option<String>,
    pub location: Option<String>,
    pub amount: Option<f64>,
}

impl TicketUpdate {
    pub fn ticket_number(value: impl Into<String>) -> Self {
        Self {
            ticket_number: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn issue_date(value: impl Into<String>) -> Self {
        Self {
            issue_date: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn license_plate(value: impl Into<String>) -> Self {
        Self {
            license_plate: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn violation(value: impl Into<String>) -> Self {
        Self {
            violation: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn location(value: impl Into<String>) -> Self {
        Self {
            location: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn amount(value: f64) -> Self {
        Self {
            amount: Some(value),
            ..Self::default()
        }
    }

    /// Merge the set fields into `ticket`.
    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(v) = &self.ticket_number {
            ticket.ticket_number = v.clone();
        }
        if let Some(v) = &self.issue_date {
            ticket.issue_date = v.clone();
        }
        if let Some(v) = &self.license_plate {
            ticket.license_plate = v.clone();
        }
        if let Some(v) = &self.violation {
            ticket.violation = v.clone();
        }
        if let Some(v) = &self.location {
            ticket.location = v.clone();
        }
        if let Some(v) = self.amount {
            ticket.amount = v;
        }
    }

    /// The first set field in [`TicketField::ORDER`] with its value rendered
    /// as message text.
    ///
    /// Returns `None` when nothing is set, or when the first set value is
    /// blank (an empty string or a zero/NaN amount).
    pub fn first_value(&self) -> Option<(TicketField, String)> {
        let (field, value) = TicketField::ORDER.iter().find_map(|field| {
            let value = match field {
                TicketField::TicketNumber => self.ticket_number.clone(),
                TicketField::IssueDate => self.issue_date.clone(),
                TicketField::LicensePlate => self.license_plate.clone(),
                TicketField::Violation => self.violation.clone(),
                TicketField::Location => self.location.clone(),
                TicketField::Amount => self.amount.map(render_amount),
            };
            value.map(|v| (*field, v))
        })?;
        (!value.is_empty()).then_some((field, value))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Zero and NaN amounts count as "not entered" and render empty.
fn render_amount(amount: f64) -> String {
    if amount == 0.0 || amount.is_nan() {
        String::new()
    } else {
        amount.to_string()
    }
}
