use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod error;
mod models;
mod routes;
#[cfg(test)]
mod testing;

use adapters::{AnthropicProvider, FsContentRepository};
use application::{ContentService, OptimizeService};
use config::ServerConfig;
use promptsmith::domain::services::CredentialResolver;

/// Type alias for the content service with its concrete repository
pub type AppContentService = ContentService<FsContentRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub optimize_service: Arc<OptimizeService>,
    pub content_service: Arc<AppContentService>,
    /// Include internal error detail in responses (development only)
    pub expose_error_details: bool,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Promptsmith API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Assemble the full HTTP surface around an application state
pub fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::optimize::router())
        .merge(routes::content::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🛠️  Promptsmith API initializing...");

    // Secrets.toml first, then process environment / .env
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_lookup(|key| {
        secrets.get(key).or_else(|| std::env::var(key).ok())
    });

    if config.is_development() {
        tracing::warn!("⚠️  Development mode - error details are exposed to callers");
    }

    let provider = Arc::new(AnthropicProvider::new(&config.llm));
    let optimize_service = Arc::new(OptimizeService::new(
        provider,
        CredentialResolver::new(config.encoded_api_key.clone()),
        config.llm.completion_options(),
    ));

    tracing::info!(
        "🤖 LLM provider: {} ({}) timeout {}s",
        optimize_service.provider_name(),
        config.llm.model,
        config.llm.timeout.as_secs()
    );
    if optimize_service.is_configured() {
        tracing::info!("🔐 LLM API key configured");
    } else {
        tracing::warn!("⚠️  No LLM_API_KEY set - optimization requests will fail");
    }

    let content_repo = Arc::new(FsContentRepository::new(config.content_dir.clone()));
    tracing::info!("📄 Template content: {}", content_repo.root().display());
    let content_service = Arc::new(ContentService::new(content_repo));

    let state = AppState {
        optimize_service,
        content_service,
        expose_error_details: config.is_development(),
    };

    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Promptsmith API ready");

    Ok(router.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_state, ScriptedProvider, WELL_FORMED_REPLY};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn fetch(uri: &str) -> (StatusCode, serde_json::Value) {
        let state = test_state(ScriptedProvider::replying(WELL_FORMED_REPLY), None, false);
        let response = build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = fetch("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let (status, body) = fetch("/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Promptsmith API");
    }
}
