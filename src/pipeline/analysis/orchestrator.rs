use std::time::Instant;

use uuid::Uuid;

use super::parser::parse_analysis_response;
use super::prompt::build_analysis_prompt;
use super::schema::analysis_response_schema;
use super::types::{ReasoningClient, ReasoningRequest};
use super::validation::validate_analysis;
use super::AnalysisError;
use crate::models::{AnalysisResult, ClaimData};

/// Runs one claim through the reasoning service:
/// prompt → single schema-constrained call → parse → validate → result.
///
/// No retries: every call is one irreversible round trip.
pub struct ClaimAnalyzer {
    client: Box<dyn ReasoningClient>,
}

impl ClaimAnalyzer {
    pub fn new(client: Box<dyn ReasoningClient>) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Analyze one claim. Blocks until the service answers or fails.
    pub fn analyze(
        &self,
        submission_id: &Uuid,
        claim: &ClaimData,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_analysis_prompt(claim);
        let request = ReasoningRequest {
            prompt: &prompt,
            response_schema: analysis_response_schema(),
        };

        tracing::info!(
            submission_id = %submission_id,
            transaction_id = %claim.transaction_id,
            status = claim.status.code(),
            model = self.client.model(),
            "Requesting claim analysis"
        );
        let started = Instant::now();

        let outcome = self
            .client
            .generate(&request)
            .and_then(|text| parse_analysis_response(&text))
            .and_then(|result| validate_analysis(&result).map(|_| result));

        match &outcome {
            Ok(result) => tracing::info!(
                submission_id = %submission_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                entries = result.journal_simulation.entries.len(),
                bad_debt = result.journal_simulation.is_bad_debt,
                "Claim analysis completed"
            ),
            Err(e) => tracing::warn!(
                submission_id = %submission_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                kind = e.kind(),
                error = %e,
                "Claim analysis failed"
            ),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::analysis::fixtures::{pending_claim_json, pending_claim_result};
    use crate::models::{ClaimStatus, SpiIssue};
    use crate::pipeline::analysis::gemini::MockReasoningClient;

    fn scenario_a_claim() -> ClaimData {
        ClaimData {
            transaction_id: "KLAIM-2023-001".into(),
            amount: 1_000_000.0,
            status: ClaimStatus::Pending,
            spi_issue: Some(SpiIssue::Docs),
            deadline_days: 5,
        }
    }

    fn analyzer_with(mock: MockReasoningClient) -> (ClaimAnalyzer, Arc<MockReasoningClient>) {
        let mock = Arc::new(mock);
        let analyzer = ClaimAnalyzer::new(Box::new(Arc::clone(&mock)));
        (analyzer, mock)
    }

    #[test]
    fn conformant_reply_yields_exact_result() {
        let (analyzer, mock) = analyzer_with(MockReasoningClient::new(pending_claim_json()));
        let result = analyzer
            .analyze(&Uuid::new_v4(), &scenario_a_claim())
            .unwrap();
        assert_eq!(result, pending_claim_result());
        assert_eq!(mock.calls(), 1);
        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("KLAIM-2023-001"));
        assert!(prompt.contains("Dokumen Medis/Resume Tidak Lengkap"));
    }

    #[test]
    fn transport_failure_is_not_retried() {
        let (analyzer, mock) = analyzer_with(MockReasoningClient::failing());
        let err = analyzer
            .analyze(&Uuid::new_v4(), &scenario_a_claim())
            .unwrap_err();
        assert_eq!(err.kind(), "connectivity");
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn empty_reply_fails() {
        let (analyzer, _) = analyzer_with(MockReasoningClient::new(""));
        assert!(matches!(
            analyzer.analyze(&Uuid::new_v4(), &scenario_a_claim()),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn non_json_reply_fails() {
        let (analyzer, mock) = analyzer_with(MockReasoningClient::new("not json"));
        assert!(matches!(
            analyzer.analyze(&Uuid::new_v4(), &scenario_a_claim()),
            Err(AnalysisError::MalformedResponse(_))
        ));
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn parseable_but_invalid_reply_fails_validation() {
        let reply = pending_claim_json().replacen("\"debit\": 1000000", "\"debit\": -1000000", 1);
        let (analyzer, _) = analyzer_with(MockReasoningClient::new(&reply));
        assert!(matches!(
            analyzer.analyze(&Uuid::new_v4(), &scenario_a_claim()),
            Err(AnalysisError::Validation(_))
        ));
    }

    #[test]
    fn exposes_model_name() {
        let (analyzer, _) = analyzer_with(MockReasoningClient::new("{}"));
        assert_eq!(analyzer.model(), "mock");
    }
}
