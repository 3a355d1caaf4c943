//! Shared application state: the analysis lifecycle and the analyzer.
//!
//! `CoreState` is created once at startup, wrapped in `Arc`, and handed to
//! every HTTP handler. It owns the single current-result slot; rendering
//! borrows snapshots of it and never mutates it.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AnalysisResult, ClaimData};
use crate::pipeline::analysis::{AnalysisError, ClaimAnalyzer};

/// The only failure text ever shown to the user.
pub const FAILURE_MESSAGE: &str =
    "Gagal menghubungkan ke Agen AI. Pastikan API Key valid dan koneksi stabil.";

/// Lifecycle of the current analysis.
///
/// Idle → Loading on submit, then Success or Failure. A new submit moves
/// straight back to Loading, discarding the previous result or error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AnalysisState {
    Idle,
    Loading {
        submission_id: Uuid,
        started_at: DateTime<Utc>,
    },
    Success {
        submission_id: Uuid,
        result: AnalysisResult,
        completed_at: DateTime<Utc>,
    },
    Failure {
        submission_id: Uuid,
        message: String,
        failed_at: DateTime<Utc>,
    },
}

impl AnalysisState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure { message, .. } => Some(message),
            _ => None,
        }
    }

    fn phase(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Failure { .. } => "failure",
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("Analysis worker failed: {0}")]
    Worker(String),
}

pub struct CoreState {
    analysis: RwLock<AnalysisState>,
    analyzer: Arc<ClaimAnalyzer>,
    /// Whether a service credential was configured at startup (health only).
    credential_configured: bool,
}

impl CoreState {
    pub fn new(analyzer: Arc<ClaimAnalyzer>, credential_configured: bool) -> Self {
        Self {
            analysis: RwLock::new(AnalysisState::Idle),
            analyzer,
            credential_configured,
        }
    }

    pub fn model(&self) -> &str {
        self.analyzer.model()
    }

    pub fn credential_configured(&self) -> bool {
        self.credential_configured
    }

    /// Owned copy of the current lifecycle state.
    pub fn snapshot(&self) -> Result<AnalysisState, CoreError> {
        self.analysis
            .read()
            .map(|state| state.clone())
            .map_err(|_| CoreError::LockPoisoned)
    }

    /// Enter Loading for a new submission, clearing any previous result and
    /// error. Returns the submission id.
    pub fn begin_submission(&self) -> Result<Uuid, CoreError> {
        let submission_id = Uuid::new_v4();
        self.replace(AnalysisState::Loading {
            submission_id,
            started_at: Utc::now(),
        })?;
        Ok(submission_id)
    }

    /// Record the outcome of a submission. The last completion wins, even if
    /// a newer submission is still in flight.
    pub fn complete(
        &self,
        submission_id: Uuid,
        outcome: &Result<AnalysisResult, CoreError>,
    ) -> Result<(), CoreError> {
        let next = match outcome {
            Ok(result) => AnalysisState::Success {
                submission_id,
                result: result.clone(),
                completed_at: Utc::now(),
            },
            Err(_) => AnalysisState::Failure {
                submission_id,
                message: FAILURE_MESSAGE.to_string(),
                failed_at: Utc::now(),
            },
        };
        self.replace(next)
    }

    /// Run one claim through the analyzer and update the lifecycle.
    ///
    /// The work runs in a detached task, so the state leaves Loading even
    /// when the caller stops waiting (a disconnected client drops this
    /// future). The blocking service call runs on the blocking thread pool.
    pub async fn submit(self: &Arc<Self>, claim: ClaimData) -> Result<AnalysisResult, CoreError> {
        let submission_id = self.begin_submission()?;

        let core = Arc::clone(self);
        let task = tokio::spawn(async move { core.run_submission(submission_id, claim).await });
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(submission_id = %submission_id, error = %e, "Analysis task failed");
                let outcome = Err(CoreError::Worker(e.to_string()));
                self.complete(submission_id, &outcome)?;
                outcome
            }
        }
    }

    async fn run_submission(
        &self,
        submission_id: Uuid,
        claim: ClaimData,
    ) -> Result<AnalysisResult, CoreError> {
        let analyzer = Arc::clone(&self.analyzer);
        let outcome = match tokio::task::spawn_blocking(move || {
            analyzer.analyze(&submission_id, &claim)
        })
        .await
        {
            Ok(result) => result.map_err(CoreError::from),
            Err(e) => {
                tracing::error!(submission_id = %submission_id, error = %e, "Analysis worker panicked");
                Err(CoreError::Worker(e.to_string()))
            }
        };

        self.complete(submission_id, &outcome)?;
        outcome
    }

    #[cfg(test)]
    pub(crate) fn poison_analysis_lock(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.analysis.write();
                    panic!("poisoning analysis lock");
                })
                .join();
        });
    }

    fn replace(&self, next: AnalysisState) -> Result<(), CoreError> {
        let mut state = self.analysis.write().map_err(|_| CoreError::LockPoisoned)?;
        tracing::debug!(from = state.phase(), to = next.phase(), "Analysis state transition");
        *state = next;
        Ok(())
    }
}
