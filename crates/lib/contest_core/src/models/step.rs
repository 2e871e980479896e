//! Wizard steps.

use serde::{Deserialize, Serialize};

/// One of the five linear wizard stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    #[default]
    TicketInfo,
    ContestReason,
    Evidence,
    Review,
    Confirmation,
}

impl Step {
    pub const ORDER: [Step; 5] = [
        Step::TicketInfo,
        Step::ContestReason,
        Step::Evidence,
        Step::Review,
        Step::Confirmation,
    ];

    /// Zero-based position in [`Step::ORDER`].
    pub fn index(self) -> usize {
        match self {
            Step::TicketInfo => 0,
            Step::ContestReason => 1,
            Step::Evidence => 2,
            Step::Review => 3,
            Step::Confirmation => 4,
        }
    }

    pub fn next(self) -> Option<Step> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Self::ORDER[i])
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Confirmation
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::TicketInfo => "ticket-info",
            Step::ContestReason => "contest-reason",
            Step::Evidence => "evidence",
            Step::Review => "review",
            Step::Confirmation => "confirmation",
        }
    }

    /// Human-readable label for step indicators.
    pub fn label(&self) -> &'static str {
        match self {
            Step::TicketInfo => "Ticket Info",
            Step::ContestReason => "Contest Reason",
            Step::Evidence => "Evidence",
            Step::Review => "Review",
            Step::Confirmation => "Confirmation",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
