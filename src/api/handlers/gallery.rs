//! Gallery REST API handlers
//!
//! The upload endpoint takes a multipart form with both images plus the
//! entry metadata; everything downstream of parsing lives in the gallery
//! service.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::error_response;
use crate::application::{GalleryImageUpdate, GalleryService};
use crate::domain::{GalleryImage, NewGalleryImage, UploadFile};

/// State for the gallery handlers
#[derive(Clone)]
pub struct GalleryAppState {
    pub service: Arc<GalleryService>,
}

/// A published before/after gallery entry
#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryImageResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Category slug, e.g. `suvs`
    pub category: String,
    /// Public URL of the "before" image
    pub before_url: String,
    /// Public URL of the "after" image
    pub after_url: String,
    pub is_featured: bool,
    pub display_order: i32,
    /// Hidden entries are only visible to admins
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GalleryImage> for GalleryImageResponse {
    fn from(g: GalleryImage) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            category: g.category,
            before_url: g.before_url,
            after_url: g.after_url,
            is_featured: g.is_featured,
            display_order: g.display_order,
            is_active: g.is_active,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

/// Metadata update request (partial update)
///
/// Send only the fields to change. The stored images themselves never
/// change; delete and re-upload to replace them.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGalleryImageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Public gallery
///
/// Active entries only, for the marketing site.
#[utoipa::path(
    get,
    path = "/api/v1/gallery",
    tag = "Gallery",
    responses(
        (status = 200, description = "Active gallery entries", body = ApiResponse<Vec<GalleryImageResponse>>)
    )
)]
pub async fn list_gallery(
    State(state): State<GalleryAppState>,
) -> Result<Json<ApiResponse<Vec<GalleryImageResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let images = state.service.list_public().await.map_err(error_response)?;
    let responses: Vec<GalleryImageResponse> = images.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Full gallery including hidden entries (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/gallery/all",
    tag = "Gallery",
    responses(
        (status = 200, description = "Every gallery entry", body = ApiResponse<Vec<GalleryImageResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_all_gallery(
    State(state): State<GalleryAppState>,
) -> Result<Json<ApiResponse<Vec<GalleryImageResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let images = state.service.list_all().await.map_err(error_response)?;
    let responses: Vec<GalleryImageResponse> = images.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Upload a before/after pair (admin)
///
/// Multipart form fields: `title`, `category`, `before` (file), `after`
/// (file), plus optional `description`, `is_featured`, `display_order`.
/// Both files must upload successfully before the entry is created; a
/// failure mid-way leaves nothing behind.
#[utoipa::path(
    post,
    path = "/api/v1/admin/gallery",
    tag = "Gallery",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Entry published", body = ApiResponse<GalleryImageResponse>),
        (status = 422, description = "Missing field or file")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_gallery_image(
    State(state): State<GalleryAppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<GalleryImageResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let input = parse_upload_form(multipart).await?;
    let image = state.service.publish(input).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(image.into()))))
}

/// Update gallery entry metadata (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/gallery/{id}",
    tag = "Gallery",
    params(
        ("id" = String, Path, description = "Gallery entry id")
    ),
    request_body = UpdateGalleryImageRequest,
    responses(
        (status = 200, description = "Updated entry", body = ApiResponse<GalleryImageResponse>),
        (status = 404, description = "No such entry")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_gallery_image(
    State(state): State<GalleryAppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateGalleryImageRequest>,
) -> Result<Json<ApiResponse<GalleryImageResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let changes = GalleryImageUpdate {
        title: request.title,
        description: request.description.map(Some),
        category: request.category,
        is_featured: request.is_featured,
        display_order: request.display_order,
        is_active: request.is_active,
    };
    let image = state
        .service
        .update(&id, changes)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(image.into())))
}

/// Delete a gallery entry (admin)
///
/// Removes the database row first, then the stored images. Images that
/// cannot be removed right away are retried in the background.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/gallery/{id}",
    tag = "Gallery",
    params(
        ("id" = String, Path, description = "Gallery entry id")
    ),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 404, description = "No such entry")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_gallery_image(
    State(state): State<GalleryAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.service.delete(&id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Gallery image deleted".to_string())))
}

fn unprocessable(message: impl Into<String>) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::error(message)),
    )
}

/// Pull the metadata fields and both files out of the multipart form
async fn parse_upload_form(
    mut multipart: Multipart,
) -> Result<NewGalleryImage, (StatusCode, Json<ApiResponse<()>>)> {
    let mut title = None;
    let mut description = None;
    let mut category = None;
    let mut is_featured = false;
    let mut display_order = 0i32;
    let mut before = None;
    let mut after = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| unprocessable(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field, &name).await?),
            "description" => description = Some(read_text(field, &name).await?),
            "category" => category = Some(read_text(field, &name).await?),
            "is_featured" => {
                is_featured = read_text(field, &name).await?.trim() == "true";
            }
            "display_order" => {
                display_order = read_text(field, &name)
                    .await?
                    .trim()
                    .parse()
                    .map_err(|_| unprocessable("display_order must be an integer"))?;
            }
            "before" | "after" => {
                let filename = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{}.jpg", name));
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| unprocessable(format!("Failed to read '{}' file: {}", name, e)))?
                    .to_vec();
                let file = UploadFile { filename, bytes };
                if name == "before" {
                    before = Some(file);
                } else {
                    after = Some(file);
                }
            }
            // Unknown fields are ignored so frontend additions do not break uploads
            _ => {}
        }
    }

    Ok(NewGalleryImage {
        title: title.ok_or_else(|| unprocessable("Missing 'title' field"))?,
        description: description.filter(|d| !d.trim().is_empty()),
        category: category.ok_or_else(|| unprocessable("Missing 'category' field"))?,
        is_featured,
        display_order,
        before: before.ok_or_else(|| unprocessable("Missing 'before' file"))?,
        after: after.ok_or_else(|| unprocessable("Missing 'after' file"))?,
    })
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, (StatusCode, Json<ApiResponse<()>>)> {
    field
        .text()
        .await
        .map_err(|e| unprocessable(format!("Failed to read '{}' field: {}", name, e)))
}
