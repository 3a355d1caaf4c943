//! Claim input form: editable draft, conditional requirements, submission checks.
//!
//! The draft is kept as raw strings so a rejected submission can be shown
//! back to the user exactly as typed. `ClaimForm::validate` is the single
//! gate between user input and `ClaimData`; the browser-side `required` and
//! `min` attributes in the rendered form mirror the same rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ClaimData, ClaimStatus, SpiIssue};

/// Fields of the claim form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    TransactionId,
    Amount,
    Status,
    SpiIssue,
    DeadlineDays,
}

impl FormField {
    /// Form input name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransactionId => "transactionId",
            Self::Amount => "amount",
            Self::Status => "status",
            Self::SpiIssue => "spiIssue",
            Self::DeadlineDays => "deadlineDays",
        }
    }
}

const BASE_REQUIRED: &[FormField] = &[FormField::TransactionId, FormField::Amount, FormField::Status];

const UNRESOLVED_REQUIRED: &[FormField] = &[
    FormField::TransactionId,
    FormField::Amount,
    FormField::Status,
    FormField::SpiIssue,
];

const BASE_VISIBLE: &[FormField] = BASE_REQUIRED;

const UNRESOLVED_VISIBLE: &[FormField] = &[
    FormField::TransactionId,
    FormField::Amount,
    FormField::Status,
    FormField::SpiIssue,
    FormField::DeadlineDays,
];

/// Fields that must be filled for a submission with the given status.
pub fn required_fields(status: ClaimStatus) -> &'static [FormField] {
    if status.requires_spi_issue() {
        UNRESOLVED_REQUIRED
    } else {
        BASE_REQUIRED
    }
}

/// Fields shown for the given status. SPI issue and deadline are hidden
/// once a claim is Approved.
pub fn visible_fields(status: ClaimStatus) -> &'static [FormField] {
    if status.requires_spi_issue() {
        UNRESOLVED_VISIBLE
    } else {
        BASE_VISIBLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Every reason a submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct FormError(pub Vec<FieldError>);

impl FormError {
    pub fn has_field(&self, field: FormField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Raw, editable claim draft as submitted by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimForm {
    pub transaction_id: String,
    pub amount: String,
    pub status: String,
    pub spi_issue: String,
    pub deadline_days: String,
}

impl Default for ClaimForm {
    fn default() -> Self {
        Self::from_claim(&ClaimData::default())
    }
}

impl ClaimForm {
    /// Draft pre-filled from an existing claim.
    pub fn from_claim(claim: &ClaimData) -> Self {
        Self {
            transaction_id: claim.transaction_id.clone(),
            amount: claim.amount.to_string(),
            status: claim.status.code().to_string(),
            spi_issue: claim.spi_issue.map(|i| i.code().to_string()).unwrap_or_default(),
            deadline_days: claim.deadline_days.to_string(),
        }
    }

    /// Status currently selected, falling back to the form default.
    pub fn selected_status(&self) -> ClaimStatus {
        self.status.parse().unwrap_or_default()
    }

    pub fn selected_spi_issue(&self) -> Option<SpiIssue> {
        self.spi_issue.parse().ok()
    }

    /// Check the draft and produce the claim to analyze.
    ///
    /// Rejects an empty transaction id, a negative or non-numeric amount, and
    /// a missing SPI issue while the status is not Approved. For Approved
    /// claims the SPI issue is dropped and the deadline is not enforced.
    pub fn validate(&self) -> Result<ClaimData, FormError> {
        let mut errors = Vec::new();
        let mut reject = |field: FormField, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        if self.transaction_id.trim().is_empty() {
            reject(FormField::TransactionId, "ID Transaksi wajib diisi.");
        }

        let amount = match self.amount.trim().parse::<f64>() {
            Ok(v) if !v.is_finite() => {
                reject(FormField::Amount, "Nilai klaim harus berupa angka.");
                None
            }
            Ok(v) if v < 0.0 => {
                reject(FormField::Amount, "Nilai klaim tidak boleh negatif.");
                None
            }
            Ok(v) => Some(v),
            Err(_) => {
                reject(FormField::Amount, "Nilai klaim harus berupa angka.");
                None
            }
        };

        let status = match self.status.parse::<ClaimStatus>() {
            Ok(s) => Some(s),
            Err(_) => {
                reject(FormField::Status, "Status klaim tidak dikenal.");
                None
            }
        };

        let mut spi_issue = None;
        let mut deadline_days = crate::models::DEFAULT_DEADLINE_DAYS;

        if let Some(status) = status {
            let deadline = parse_deadline(&self.deadline_days);
            if status.requires_spi_issue() {
                let raw = self.spi_issue.trim();
                if raw.is_empty() {
                    reject(FormField::SpiIssue, "Kategori kendala SPI wajib dipilih.");
                } else {
                    match raw.parse::<SpiIssue>() {
                        Ok(issue) => spi_issue = Some(issue),
                        Err(_) => reject(FormField::SpiIssue, "Kategori kendala SPI tidak dikenal."),
                    }
                }
                match deadline {
                    Some(days) => deadline_days = days,
                    None => reject(
                        FormField::DeadlineDays,
                        "Batas waktu perbaikan harus bilangan bulat tidak negatif.",
                    ),
                }
            } else if let Some(days) = deadline {
                deadline_days = days;
            }
        }

        match (amount, status) {
            (Some(amount), Some(status)) if errors.is_empty() => Ok(ClaimData {
                transaction_id: self.transaction_id.clone(),
                amount,
                status,
                spi_issue,
                deadline_days,
            }),
            _ => Err(FormError(errors)),
        }
    }
}

/// An empty deadline counts as zero days, like a cleared number input.
fn parse_deadline(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse::<u32>().ok()
}
