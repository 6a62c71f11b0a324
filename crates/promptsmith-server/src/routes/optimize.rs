//! Optimize Routes - Rewrite a prompt for a target model
//!
//! Thin handler: validate, delegate to OptimizeService, wrap the result.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use promptsmith::{OptimizationRequest, TargetModel};

use crate::error::ApiError;
use crate::models::{ErrorResponse, OptimizeRequestBody, OptimizeResponse};
use crate::AppState;

/// Optimize a prompt
///
/// POST /api/optimize-prompt
#[utoipa::path(
    post,
    path = "/api/optimize-prompt",
    request_body = OptimizeRequestBody,
    responses(
        (status = 200, description = "Optimized prompt", body = OptimizeResponse),
        (status = 400, description = "Missing prompt or malformed body", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Configuration or upstream failure", body = ErrorResponse)
    ),
    tag = "Optimize"
)]
pub async fn optimize_prompt(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequestBody>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("optimize_prompt", %request_id);

    handle_optimize(state, payload).instrument(span).await
}

async fn handle_optimize(
    state: AppState,
    payload: Result<Json<OptimizeRequestBody>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::info!("Rejected request body: {}", rejection.body_text());
        ApiError::from_rejection(rejection)
    })?;

    let target_model = TargetModel::resolve(body.target_model.as_ref().and_then(|v| v.as_str()));
    let settings = body.optimization_settings.unwrap_or_default();

    let request = OptimizationRequest::new(body.prompt.unwrap_or_default(), target_model, settings)
        .map_err(|e| ApiError::from_domain(e, state.expose_error_details))?;

    let outcome = state
        .optimize_service
        .optimize(&request)
        .await
        .map_err(|e| ApiError::from_domain(e, state.expose_error_details))?;

    Ok(Json(OptimizeResponse {
        original: request.prompt,
        optimized: outcome.result.optimized_prompt,
        improvements: outcome.result.improvements,
        analysis: outcome.result.analysis,
        target_model: request.target_model,
        usage: outcome.usage,
        timestamp: Utc::now(),
    }))
}

async fn method_not_allowed() -> impl IntoResponse {
    ([(header::ALLOW, "POST")], ApiError::method_not_allowed())
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/optimize-prompt",
        post(optimize_prompt).fallback(method_not_allowed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        test_state, ScriptedProvider, ENCODED_TEST_KEY, WELL_FORMED_REPLY,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn post_json(router: Router, body: String) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/optimize-prompt")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(provider: Arc<ScriptedProvider>, key: Option<&str>, development: bool) -> Router {
        crate::build_router(test_state(provider, key, development))
    }

    #[tokio::test]
    async fn test_optimize_success_envelope() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

        let response = post_json(
            router,
            json!({"prompt": "write a haiku", "targetModel": "anthropic"}).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["original"], "write a haiku");
        assert_eq!(
            body["optimized"],
            "You are a poet. Write a 3-line haiku about autumn leaves."
        );
        assert_eq!(body["improvements"][0], "Added a role");
        assert_eq!(body["analysis"]["originalScore"], 40);
        assert_eq!(body["targetModel"], "anthropic");
        assert_eq!(body["usage"]["totalTokens"], 200);
        assert!(body["timestamp"].as_str().unwrap().contains('T'));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_without_upstream_call() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

        let response = post_json(router, json!({"prompt": ""}).to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Prompt is required");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_and_blank_prompt_are_rejected() {
        for payload in [json!({}), json!({"prompt": "   \n"}), json!({"prompt": null})] {
            let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
            let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

            let response = post_json(router, payload.to_string()).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(provider.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

        let response = post_json(router, "{\"prompt\": ".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid JSON body");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_envelope() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/optimize-prompt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
        let body = json_body(response).await;
        assert_eq!(body["error"], "Method not allowed");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_hides_details_in_production() {
        let provider = ScriptedProvider::failing(Some(503), "overloaded");
        let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

        let response = post_json(router, json!({"prompt": "hello"}).to_string()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to optimize prompt");
        assert!(body.get("details").is_none());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_shows_details_in_development() {
        let provider = ScriptedProvider::failing(Some(503), "overloaded");
        let router = app(provider, Some(ENCODED_TEST_KEY), true);

        let response = post_json(router, json!({"prompt": "hello"}).to_string()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["details"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_500_without_upstream_call() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider.clone(), None, false);

        let response = post_json(router, json!({"prompt": "hello"}).to_string()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Server configuration error");
        assert!(body.get("details").is_none());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_omitted_settings_match_all_enabled() {
        let omitted = ScriptedProvider::replying(WELL_FORMED_REPLY);
        post_json(
            app(omitted.clone(), Some(ENCODED_TEST_KEY), false),
            json!({"prompt": "hello", "targetModel": "google"}).to_string(),
        )
        .await;

        let explicit = ScriptedProvider::replying(WELL_FORMED_REPLY);
        post_json(
            app(explicit.clone(), Some(ENCODED_TEST_KEY), false),
            json!({
                "prompt": "hello",
                "targetModel": "google",
                "optimizationSettings": {
                    "includeExamples": true,
                    "addConstraints": true,
                    "improveClarity": true,
                    "addStructure": true
                }
            })
            .to_string(),
        )
        .await;

        assert!(omitted.last_message().is_some());
        assert_eq!(omitted.last_message(), explicit.last_message());
    }

    #[tokio::test]
    async fn test_unknown_target_model_falls_back_to_openai() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider, Some(ENCODED_TEST_KEY), false);

        let response = post_json(
            router,
            json!({"prompt": "hello", "targetModel": "mistral"}).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["targetModel"], "openai");
    }

    #[tokio::test]
    async fn test_unparseable_reply_still_succeeds() {
        let provider = ScriptedProvider::replying("Sorry, here is some prose instead.");
        let router = app(provider, Some(ENCODED_TEST_KEY), false);

        let response = post_json(router, json!({"prompt": "hello"}).to_string()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["optimized"], "hello");
        assert_eq!(body["targetModel"], "openai");
    }

    #[tokio::test]
    async fn test_loosely_typed_fields_resolve_to_defaults() {
        let baseline = ScriptedProvider::replying(WELL_FORMED_REPLY);
        post_json(
            app(baseline.clone(), Some(ENCODED_TEST_KEY), false),
            json!({"prompt": "hello"}).to_string(),
        )
        .await;
        assert!(baseline.last_message().is_some());

        for payload in [
            json!({"prompt": "hello", "targetModel": 42}),
            json!({"prompt": "hello", "optimizationSettings": {"includeExamples": null}}),
            json!({"prompt": "hello", "optimizationSettings": {"addStructure": "no"}}),
            json!({"prompt": "hello", "optimizationSettings": "all"}),
        ] {
            let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
            let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

            let response = post_json(router, payload.to_string()).await;

            assert_eq!(response.status(), StatusCode::OK, "payload {payload}");
            assert_eq!(json_body(response).await["targetModel"], "openai");
            assert_eq!(provider.last_message(), baseline.last_message(), "payload {payload}");
        }
    }

    #[tokio::test]
    async fn test_explicit_false_flag_changes_meta_prompt() {
        let provider = ScriptedProvider::replying(WELL_FORMED_REPLY);
        let router = app(provider.clone(), Some(ENCODED_TEST_KEY), false);

        let response = post_json(
            router,
            json!({"prompt": "hello", "optimizationSettings": {"includeExamples": false}})
                .to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let message = provider.last_message().unwrap();
        assert!(message.contains("includeExamples: false"));
        assert!(message.contains("addStructure: true"));
    }
}
