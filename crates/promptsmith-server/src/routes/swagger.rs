//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use promptsmith::{Analysis, ContentRecord, OptimizationSettings, TargetModel, TokenUsage};

use crate::models::{ErrorResponse, OptimizeRequestBody, OptimizeResponse, SlugListResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Optimize endpoints
        super::optimize::optimize_prompt,
        // Template endpoints
        super::content::list_templates,
        super::content::get_template,
    ),
    info(
        title = "Promptsmith API",
        version = "0.1.0",
        description = "Rewrites prompts into model-tuned versions with a quality analysis.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Optimize", description = "Optimize - Rewrite a prompt for a target model"),
        (name = "Templates", description = "Templates - SEO content records"),
    ),
    components(
        schemas(
            // Optimize
            OptimizeRequestBody,
            OptimizeResponse,
            OptimizationSettings,
            TargetModel,
            Analysis,
            TokenUsage,
            // Templates
            SlugListResponse,
            ContentRecord,
            // Errors
            ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/optimize-prompt"));
        assert!(paths.iter().any(|p| *p == "/api/templates/{slug}"));
    }
}
