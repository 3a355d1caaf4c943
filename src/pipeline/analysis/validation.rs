// Post-parse checks for a model-produced analysis.
// Hard issues (negative or non-finite money, nameless accounts) reject the
// payload. Double-entry shape is only reported: the journal is the model's
// output and is rendered as received.

use super::AnalysisError;
use crate::models::{AnalysisResult, FinancialImpactItem, JournalSimulation};

/// Tolerance when comparing debit and credit totals (IDR).
const BALANCE_TOLERANCE: f64 = 0.5;

/// Soft findings on an accepted analysis.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

/// Validate value-level constraints the schema cannot express.
///
/// Returns `AnalysisError::Validation` listing every hard issue, or a report
/// of soft warnings (already logged) when the payload is accepted.
pub fn validate_analysis(result: &AnalysisResult) -> Result<ValidationReport, AnalysisError> {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    check_journal(&result.journal_simulation, &mut issues, &mut warnings);
    check_impact_items(
        "balanceSheet",
        &result.financial_reporting.balance_sheet,
        &mut issues,
    );
    check_impact_items(
        "operationalReport",
        &result.financial_reporting.operational_report,
        &mut issues,
    );

    if !issues.is_empty() {
        return Err(AnalysisError::Validation(issues));
    }

    if !warnings.is_empty() {
        tracing::warn!(
            warning_count = warnings.len(),
            warnings = ?warnings,
            "Journal simulation is not a clean double entry"
        );
    }

    Ok(ValidationReport { warnings })
}

fn check_money(path: String, value: f64, issues: &mut Vec<String>) {
    if !value.is_finite() {
        issues.push(format!("{path} must be a finite number"));
    } else if value < 0.0 {
        issues.push(format!("{path} must be >= 0 (got {value})"));
    }
}

fn check_journal(journal: &JournalSimulation, issues: &mut Vec<String>, warnings: &mut Vec<String>) {
    for (idx, line) in journal.entries.iter().enumerate() {
        if line.account_name.trim().is_empty() {
            issues.push(format!("entries[{idx}].accountName must not be empty"));
        }
        if let Some(debit) = line.debit {
            check_money(format!("entries[{idx}].debit"), debit, issues);
        }
        if let Some(credit) = line.credit {
            check_money(format!("entries[{idx}].credit"), credit, issues);
        }

        match (line.is_debit(), line.is_credit()) {
            (true, true) => warnings.push(format!(
                "entries[{idx}] ({}) posts both debit and credit",
                line.account_name
            )),
            (false, false) => warnings.push(format!(
                "entries[{idx}] ({}) posts neither debit nor credit",
                line.account_name
            )),
            _ => {}
        }
    }

    let (debit, credit) = journal.totals();
    if debit.is_finite() && credit.is_finite() && (debit - credit).abs() > BALANCE_TOLERANCE {
        warnings.push(format!(
            "debit total {debit} does not equal credit total {credit}"
        ));
    }
}

fn check_impact_items(list: &str, items: &[FinancialImpactItem], issues: &mut Vec<String>) {
    for (idx, item) in items.iter().enumerate() {
        check_money(format!("{list}[{idx}].amount"), item.amount, issues);
    }
}
