//! JSON analysis endpoint: the same flow as the form, without HTML.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::form::ClaimForm;
use crate::models::{AnalysisResult, ClaimData};

/// `POST /api/analyze`: body is a `ClaimData`, reply is the `AnalysisResult`.
///
/// The claim passes the same checks as the browser form. Service failures
/// return 502 with the fixed user message.
pub async fn analyze(
    State(core): State<Arc<CoreState>>,
    payload: Result<Json<ClaimData>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(claim) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let claim = ClaimForm::from_claim(&claim).validate()?;
    let result = core.submit(claim).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::api::router::app_router;
    use crate::api::router::test_support::mock_core;
    use crate::core_state::FAILURE_MESSAGE;
    use crate::models::analysis::fixtures::{pending_claim_json, pending_claim_result};
    use crate::models::AnalysisResult;
    use crate::pipeline::analysis::gemini::MockReasoningClient;

    fn json_post(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn scenario_a() -> serde_json::Value {
        serde_json::json!({
            "transactionId": "KLAIM-2023-001",
            "amount": 1000000,
            "status": "PENDING",
            "spiIssue": "DOCS",
            "deadlineDays": 5
        })
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn returns_result_json() {
        let (core, mock) = mock_core(MockReasoningClient::new(pending_claim_json()));
        let resp = app_router(core).oneshot(json_post(scenario_a())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let result: AnalysisResult = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(result, pending_claim_result());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn service_failure_is_502() {
        let (core, _) = mock_core(MockReasoningClient::failing());
        let resp = app_router(core).oneshot(json_post(scenario_a())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "ANALYSIS_FAILED");
        assert_eq!(json["error"]["message"], FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn empty_reply_is_502() {
        let (core, _) = mock_core(MockReasoningClient::new("   "));
        let resp = app_router(core).oneshot(json_post(scenario_a())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn missing_spi_issue_is_422() {
        let (core, mock) = mock_core(MockReasoningClient::new(pending_claim_json()));
        let mut claim = scenario_a();
        claim["spiIssue"] = serde_json::Value::Null;
        let resp = app_router(core).oneshot(json_post(claim)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "INVALID_CLAIM");
        assert_eq!(json["error"]["fields"][0]["field"], "spiIssue");
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let (core, _) = mock_core(MockReasoningClient::new(pending_claim_json()));
        let resp = app_router(core)
            .oneshot(json_post(serde_json::json!({"transactionId": "X", "status": "LOST"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }
}
