//! Contest reasons offered to the user.

use serde::{Deserialize, Serialize};

/// Id of the catalog entry that takes free-text justification.
pub const CUSTOM_REASON_ID: &str = "custom";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestReason {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Qualitative label such as `"High"` or `"Varies"`.
    pub success_rate: String,
    /// Response letter template; empty for the custom reason.
    pub template: String,
}

impl ContestReason {
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_REASON_ID
    }
}
