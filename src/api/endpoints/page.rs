//! The browser page and its form submit.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

use crate::api::error::ApiError;
use crate::core_state::{CoreError, CoreState};
use crate::form::{ClaimForm, FormError};
use crate::render::{render_page, PageView};

/// `GET /`: a fresh form, plus the current analysis state.
pub async fn index(State(core): State<Arc<CoreState>>) -> Result<Response, ApiError> {
    render(&core, &ClaimForm::default(), None)
}

/// `POST /analyze`: validate the submitted form, run the analysis, and
/// render the page with its outcome. Rejected forms come back as 422 with
/// the user's input intact and nothing sent to the service.
pub async fn submit(
    State(core): State<Arc<CoreState>>,
    Form(form): Form<ClaimForm>,
) -> Result<Response, ApiError> {
    let claim = match form.validate() {
        Ok(claim) => claim,
        Err(errors) => {
            tracing::info!(fields = errors.0.len(), "Claim form rejected");
            let mut response = render(&core, &form, Some(&errors))?;
            *response.status_mut() = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(response);
        }
    };

    // Analysis failures are already recorded in the shared state and render
    // as the fixed message.
    match core.submit(claim).await {
        Ok(_) | Err(CoreError::Analysis(_)) | Err(CoreError::Worker(_)) => {}
        Err(e @ CoreError::LockPoisoned) => return Err(e.into()),
    }

    render(&core, &form, None)
}

fn render(
    core: &CoreState,
    draft: &ClaimForm,
    form_errors: Option<&FormError>,
) -> Result<Response, ApiError> {
    let state = core.snapshot()?;
    let html = render_page(&PageView {
        draft,
        state: &state,
        form_errors,
    });
    Ok(Html(html).into_response())
}
