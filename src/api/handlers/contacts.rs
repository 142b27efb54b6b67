//! Contact form REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::domain::{ContactStatus, ContactSubmission, Storage};
use crate::notifications::{
    ContactReceivedEvent, ContactStatusChangedEvent, Event, SharedEventBus,
};

/// State for the contact handlers
#[derive(Clone)]
pub struct ContactAppState {
    pub storage: Arc<dyn Storage>,
    pub event_bus: SharedEventBus,
}

/// Contact form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Dana Reyes",
    "email": "dana@example.com",
    "phone": "555-0142",
    "service_interest": "full-detail",
    "message": "Do you do fleet discounts?"
}))]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    /// Which service the customer asked about, if any
    pub service_interest: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    pub message: String,
}

/// A contact form submission
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_interest: Option<String>,
    pub message: String,
    /// `new`, `in_progress`, `resolved` or `closed`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactSubmission> for ContactResponse {
    fn from(c: ContactSubmission) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            service_interest: c.service_interest,
            message: c.message,
            status: c.status.to_string(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Filters for the admin contact list
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ContactListQuery {
    /// Filter by status: `new`, `in_progress`, `resolved`, `closed`
    /// (`contacted` is accepted as a legacy alias for `in_progress`)
    pub status: Option<String>,
    /// Page number (1-based). Default: 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (1-100). Default: 50
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContactStatusRequest {
    /// `new`, `in_progress`, `resolved` or `closed`
    pub status: String,
}

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    tag = "Contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Submission received", body = ApiResponse<ContactResponse>),
        (status = 422, description = "Invalid form input")
    )
)]
pub async fn submit_contact(
    State(state): State<ContactAppState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let mut submission = ContactSubmission::new(request.name, request.email, request.message);
    submission.phone = request.phone;
    submission.service_interest = request.service_interest;

    let saved = state
        .storage
        .save_contact(submission)
        .await
        .map_err(error_response)?;

    metrics::counter!("contacts_received_total").increment(1);
    state
        .event_bus
        .publish(Event::ContactReceived(ContactReceivedEvent {
            contact_id: saved.id.clone(),
            name: saved.name.clone(),
            subject: saved.service_interest.clone(),
            timestamp: Utc::now(),
        }));

    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// List contact submissions (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts",
    tag = "Contacts",
    params(ContactListQuery),
    responses(
        (status = 200, description = "One page of submissions", body = ApiResponse<PaginatedResponse<ContactResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_contacts(
    State(state): State<ContactAppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<ContactResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(ContactStatus::parse(raw).ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(format!("unknown status '{}'", raw))),
            )
        })?),
    };

    let (contacts, total) = state
        .storage
        .list_contacts(status, query.page, query.limit)
        .await
        .map_err(error_response)?;

    let items: Vec<ContactResponse> = contacts.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        query.page,
        query.limit,
    ))))
}

/// Get one contact submission (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/contacts/{id}",
    tag = "Contacts",
    params(
        ("id" = String, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "The submission", body = ApiResponse<ContactResponse>),
        (status = 404, description = "No such submission")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_contact(
    State(state): State<ContactAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ContactResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.storage.get_contact(&id).await {
        Ok(Some(contact)) => Ok(Json(ApiResponse::success(contact.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Contact {} not found", id))),
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// Change a contact submission status (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/contacts/{id}/status",
    tag = "Contacts",
    params(
        ("id" = String, Path, description = "Submission id")
    ),
    request_body = UpdateContactStatusRequest,
    responses(
        (status = 200, description = "Updated submission", body = ApiResponse<ContactResponse>),
        (status = 404, description = "No such submission"),
        (status = 422, description = "Unknown status value")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_contact_status(
    State(state): State<ContactAppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateContactStatusRequest>,
) -> Result<Json<ApiResponse<ContactResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = ContactStatus::parse(&request.status).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format!(
                "unknown status '{}'",
                request.status
            ))),
        )
    })?;

    let before = match state.storage.get_contact(&id).await {
        Ok(Some(contact)) => contact,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Contact {} not found", id))),
            ));
        }
        Err(e) => return Err(error_response(e)),
    };

    let updated = state
        .storage
        .update_contact_status(&id, status)
        .await
        .map_err(error_response)?;

    if before.status != updated.status {
        state
            .event_bus
            .publish(Event::ContactStatusChanged(ContactStatusChangedEvent {
                contact_id: updated.id.clone(),
                old_status: before.status.to_string(),
                new_status: updated.status.to_string(),
                timestamp: Utc::now(),
            }));
    }

    Ok(Json(ApiResponse::success(updated.into())))
}
