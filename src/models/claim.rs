use serde::{Deserialize, Serialize};

use super::enums::{ClaimStatus, SpiIssue};

/// Default correction window shown on a fresh form.
pub const DEFAULT_DEADLINE_DAYS: u32 = 10;

/// Hospital-claim metadata supplied by the user.
///
/// Lives only in form state and is replaced on every submit. `spi_issue` must
/// be present whenever `status` is not Approved; see `crate::form`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimData {
    pub transaction_id: String,
    /// Claim value in IDR.
    pub amount: f64,
    pub status: ClaimStatus,
    #[serde(default)]
    pub spi_issue: Option<SpiIssue>,
    #[serde(default = "default_deadline_days")]
    pub deadline_days: u32,
}

fn default_deadline_days() -> u32 {
    DEFAULT_DEADLINE_DAYS
}

impl Default for ClaimData {
    fn default() -> Self {
        Self {
            transaction_id: String::new(),
            amount: 0.0,
            status: ClaimStatus::Pending,
            spi_issue: None,
            deadline_days: DEFAULT_DEADLINE_DAYS,
        }
    }
}

impl ClaimData {
    /// Label of the SPI issue, or the empty string when none is selected.
    pub fn spi_issue_label(&self) -> &'static str {
        self.spi_issue.map(|issue| issue.label()).unwrap_or("")
    }
}
