pub mod types;
pub mod prompt;
pub mod schema;
pub mod parser;
pub mod validation;
pub mod gemini;
pub mod orchestrator;

pub use types::*;
pub use prompt::*;
pub use schema::*;
pub use parser::*;
pub use validation::*;
pub use gemini::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Reasoning service is unreachable at {0}")]
    Connection(String),

    #[error("Reasoning service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("No API key configured for the reasoning service")]
    MissingCredential,

    #[error("Reasoning service returned an empty response")]
    EmptyResponse,

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("Analysis response failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl AnalysisError {
    /// Short, stable tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) | Self::Service { .. } | Self::HttpClient(_) => "connectivity",
            Self::MissingCredential => "credential",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Validation(_) => "validation",
        }
    }
}
