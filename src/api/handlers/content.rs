//! Home page content handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ApiResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::domain::{HomeContent, Storage};

/// State for the content handlers
#[derive(Clone)]
pub struct ContentAppState {
    pub storage: Arc<dyn Storage>,
}

/// One editable section of the home page
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentResponse {
    /// Section slug, e.g. `hero` or `about`
    pub section: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<HomeContent> for ContentResponse {
    fn from(c: HomeContent) -> Self {
        Self {
            section: c.section,
            title: c.title,
            subtitle: c.subtitle,
            body: c.body,
            image_url: c.image_url,
            sort_order: c.sort_order,
            updated_at: c.updated_at,
        }
    }
}

/// Section replace request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Home page content
///
/// Every section in display order, for the marketing site.
#[utoipa::path(
    get,
    path = "/api/v1/content",
    tag = "Content",
    responses(
        (status = 200, description = "All sections", body = ApiResponse<Vec<ContentResponse>>)
    )
)]
pub async fn list_content(
    State(state): State<ContentAppState>,
) -> Result<Json<ApiResponse<Vec<ContentResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let sections = state.storage.list_content().await.map_err(error_response)?;
    let responses: Vec<ContentResponse> = sections.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Replace a home page section (admin)
///
/// Creates the section when the slug is new, so fresh page areas never need
/// a migration.
#[utoipa::path(
    put,
    path = "/api/v1/admin/content/{section}",
    tag = "Content",
    params(
        ("section" = String, Path, description = "Section slug, e.g. `hero`")
    ),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Stored section", body = ApiResponse<ContentResponse>),
        (status = 422, description = "Invalid input")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_content(
    State(state): State<ContentAppState>,
    Path(section): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateContentRequest>,
) -> Result<Json<ApiResponse<ContentResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    if section.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error("section slug must not be empty")),
        ));
    }

    let content = HomeContent {
        section,
        title: request.title,
        subtitle: request.subtitle,
        body: request.body,
        image_url: request.image_url,
        sort_order: request.sort_order,
        updated_at: Utc::now(),
    };

    let stored = state
        .storage
        .upsert_content(content)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(stored.into())))
}
