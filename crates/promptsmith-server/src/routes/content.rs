//! Template Routes - SEO content records

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use promptsmith::ContentRecord;

use crate::error::ApiError;
use crate::models::{ErrorResponse, SlugListResponse};
use crate::AppState;

/// List available template slugs
#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "Known slugs, sorted", body = SlugListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Templates"
)]
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<SlugListResponse>, ApiError> {
    let slugs = state
        .content_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, state.expose_error_details))?;

    Ok(Json(slugs.into()))
}

/// Get a template record by slug
#[utoipa::path(
    get,
    path = "/api/templates/{slug}",
    params(
        ("slug" = String, Path, description = "Template slug")
    ),
    responses(
        (status = 200, description = "Template record", body = ContentRecord),
        (status = 404, description = "Template not found", body = ErrorResponse)
    ),
    tag = "Templates"
)]
pub async fn get_template(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ContentRecord>, ApiError> {
    let record = state
        .content_service
        .get(&slug)
        .await
        .map_err(|e| ApiError::from_domain(e, state.expose_error_details))?;

    Ok(Json(record))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/templates", get(list_templates))
        .route("/api/templates/:slug", get(get_template))
}
