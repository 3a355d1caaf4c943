use serde::{Deserialize, Serialize};

use super::enums::ImpactDirection;

/// Structured answer returned by the reasoning service.
///
/// Produced entirely by the external model and never modified locally: the
/// current result is replaced wholesale by the next successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub diagnosis: Diagnosis,
    pub journal_simulation: JournalSimulation,
    pub financial_reporting: FinancialReporting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub risk_analysis: String,
    pub corrective_action: String,
    pub responsible_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSimulation {
    pub description: String,
    pub entries: Vec<JournalEntryLine>,
    pub is_bad_debt: bool,
}

/// One ledger line. By convention exactly one side is populated; the schema
/// does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryLine {
    pub account_name: String,
    #[serde(default)]
    pub debit: Option<f64>,
    #[serde(default)]
    pub credit: Option<f64>,
}

impl JournalEntryLine {
    /// Debit side posting: a present, non-zero debit.
    pub fn is_debit(&self) -> bool {
        self.debit.is_some_and(|d| d != 0.0)
    }

    pub fn is_credit(&self) -> bool {
        self.credit.is_some_and(|c| c != 0.0)
    }
}

impl JournalSimulation {
    /// Sum of debits and credits across all lines (absent sides count as zero).
    pub fn totals(&self) -> (f64, f64) {
        self.entries.iter().fold((0.0, 0.0), |(debit, credit), line| {
            (
                debit + line.debit.unwrap_or(0.0),
                credit + line.credit.unwrap_or(0.0),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReporting {
    pub balance_sheet: Vec<FinancialImpactItem>,
    pub operational_report: Vec<FinancialImpactItem>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialImpactItem {
    pub category: String,
    pub item: String,
    pub impact_description: String,
    pub amount: f64,
    pub direction: ImpactDirection,
}
