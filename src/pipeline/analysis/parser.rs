use std::sync::OnceLock;

use regex::Regex;

use super::AnalysisError;
use crate::models::AnalysisResult;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```(?:json|JSON)?\s*(.*?)\s*```$").expect("fence regex is valid")
    })
}

/// Parse the service's raw text into a typed `AnalysisResult`.
///
/// The reply is expected to be a bare JSON document; a single surrounding
/// ```json fence is tolerated. Typed deserialization enforces required
/// fields and `direction` membership; value-level checks live in
/// `validate_analysis`.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let json_str = fence_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);

    serde_json::from_str(json_str).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::fixtures::{pending_claim_json, pending_claim_result};

    #[test]
    fn parses_bare_json() {
        let result = parse_analysis_response(pending_claim_json()).unwrap();
        assert_eq!(result, pending_claim_result());
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{}\n```", pending_claim_json());
        let result = parse_analysis_response(&fenced).unwrap();
        assert_eq!(result.journal_simulation.entries.len(), 2);
    }

    #[test]
    fn blank_text_is_empty_response() {
        assert!(matches!(
            parse_analysis_response(""),
            Err(AnalysisError::EmptyResponse)
        ));
        assert!(matches!(
            parse_analysis_response("  \n\t"),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn prose_is_malformed() {
        let result = parse_analysis_response("Maaf, saya tidak dapat membantu.");
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn missing_section_is_malformed() {
        let result = parse_analysis_response(
            r#"{"diagnosis": {"riskAnalysis": "a", "correctiveAction": "b", "responsibleUnit": "c"}}"#,
        );
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn unknown_direction_is_malformed() {
        let bad = pending_claim_json().replacen("\"increase\"", "\"up\"", 1);
        assert!(matches!(
            parse_analysis_response(&bad),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }
}
