use serde_json::Value;

use super::AnalysisError;

/// One schema-constrained generation request.
#[derive(Debug, Clone)]
pub struct ReasoningRequest<'a> {
    pub prompt: &'a str,
    /// Structured-output schema the reply must conform to.
    pub response_schema: &'a Value,
}

/// Generative reasoning service abstraction (allows mocking).
///
/// Implementations perform exactly one round trip per call and return the
/// raw response text. No retries.
pub trait ReasoningClient: Send + Sync {
    fn generate(&self, request: &ReasoningRequest<'_>) -> Result<String, AnalysisError>;

    /// Model identifier, for logs and the health endpoint.
    fn model(&self) -> &str;
}

impl<T: ReasoningClient + ?Sized> ReasoningClient for std::sync::Arc<T> {
    fn generate(&self, request: &ReasoningRequest<'_>) -> Result<String, AnalysisError> {
        (**self).generate(request)
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}
