//! Booking REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::{ApiResponse, PaginatedResponse};
use crate::api::handlers::error_response;
use crate::application::BookingService;
use crate::domain::{
    Booking, BookingDraft, BookingFilter, BookingStatus, DomainError, ServiceLocation,
};

/// State for the booking handlers
#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

/// Customer input collected across the booking wizard
///
/// Partially filled drafts are fine; the validation endpoints report which
/// fields are still missing.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookingDraftDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub vehicle_year: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    /// Stable service id, e.g. `full-detail`
    pub service_id: Option<String>,
    pub add_on_ids: Vec<String>,
    /// `shop`, `mobile` or `home`. Default: `shop`
    pub location: Option<String>,
    /// Required when the location is `mobile` or `home`
    pub address: String,
    /// Requested service date (ISO 8601)
    pub preferred_date: Option<NaiveDate>,
    /// Requested time window, e.g. `09:00`
    pub time_slot: String,
}

impl BookingDraftDto {
    fn into_draft(self) -> Result<BookingDraft, DomainError> {
        let location = match self.location.as_deref() {
            None => ServiceLocation::Shop,
            Some(raw) => ServiceLocation::parse(raw)
                .ok_or_else(|| DomainError::Validation(format!("unknown location '{}'", raw)))?,
        };

        Ok(BookingDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            vehicle_type: self.vehicle_type,
            vehicle_year: self.vehicle_year,
            vehicle_make: self.vehicle_make,
            vehicle_model: self.vehicle_model,
            service_id: self.service_id,
            add_on_ids: self.add_on_ids,
            location,
            address: self.address,
            preferred_date: self.preferred_date,
            time_slot: self.time_slot,
        })
    }
}

/// Booking submission request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitBookingRequest {
    /// Client-generated key that makes submission retries safe. Resubmitting
    /// with the same key returns the original booking.
    pub submission_key: String,
    #[serde(flatten)]
    pub draft: BookingDraftDto,
}

/// Wizard step validation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateStepRequest {
    /// Wizard step number (1-4)
    pub step: u8,
    #[serde(flatten)]
    pub draft: BookingDraftDto,
}

/// Wizard step validation result
#[derive(Debug, Serialize, ToSchema)]
pub struct StepValidationResponse {
    /// Wizard step number (1-4)
    pub step: u8,
    /// Whether the wizard may advance past this step
    pub valid: bool,
    /// Fields still missing for this step
    pub missing_fields: Vec<String>,
}

/// A submitted booking
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    /// Internal booking id (UUID)
    pub id: String,
    /// Customer-facing reference code, e.g. `AQ-7F3K2Q`
    pub reference_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_type: String,
    pub vehicle_year: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub service_id: String,
    pub add_on_ids: Vec<String>,
    /// `shop`, `mobile` or `home`
    pub location: String,
    pub address: Option<String>,
    pub preferred_date: NaiveDate,
    pub time_slot: String,
    /// Server-computed total in whole US dollars
    pub total_price: i64,
    /// `pending`, `confirmed`, `completed` or `cancelled`
    pub status: String,
    /// Free-form notes added by staff
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            reference_code: b.reference_code,
            first_name: b.first_name,
            last_name: b.last_name,
            email: b.email,
            phone: b.phone,
            vehicle_type: b.vehicle_type,
            vehicle_year: b.vehicle_year,
            vehicle_make: b.vehicle_make,
            vehicle_model: b.vehicle_model,
            service_id: b.service_id,
            add_on_ids: b.add_on_ids,
            location: b.location.to_string(),
            address: b.address,
            preferred_date: b.preferred_date,
            time_slot: b.time_slot,
            total_price: b.total_price,
            status: b.status.to_string(),
            notes: b.notes,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Filters for the admin booking list
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BookingListQuery {
    /// Filter by status: `pending`, `confirmed`, `completed`, `cancelled`
    pub status: Option<String>,
    /// Filter by requested service date (ISO 8601)
    pub date: Option<NaiveDate>,
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
pub struct UpdateBookingStatusRequest {
    /// `pending`, `confirmed`, `completed` or `cancelled`
    pub status: String,
}

/// Submit a booking
///
/// The wizard guards are re-run server-side and the price is recomputed from
/// the catalog, so nothing the client sends is trusted. Bookings always start
/// as `pending`. Resubmitting with a known `submission_key` returns the
/// stored booking with a 200 instead of creating a duplicate.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = SubmitBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingResponse>),
        (status = 200, description = "Submission key already seen, returns the stored booking", body = ApiResponse<BookingResponse>),
        (status = 422, description = "Draft is incomplete")
    )
)]
pub async fn submit_booking(
    State(state): State<BookingAppState>,
    Json(request): Json<SubmitBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let draft = request.draft.into_draft().map_err(error_response)?;
    let outcome = state
        .service
        .submit(draft, &request.submission_key)
        .await
        .map_err(error_response)?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::success(outcome.booking.into()))))
}

/// Validate one wizard step
///
/// Lets the frontend gate the Next button without duplicating the rules.
/// Going backward never needs validation, so only forward moves call this.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/validate-step",
    tag = "Bookings",
    request_body = ValidateStepRequest,
    responses(
        (status = 200, description = "Validation result", body = ApiResponse<StepValidationResponse>),
        (status = 422, description = "Unknown step number")
    )
)]
pub async fn validate_step(
    State(state): State<BookingAppState>,
    Json(request): Json<ValidateStepRequest>,
) -> Result<Json<ApiResponse<StepValidationResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let draft = request.draft.into_draft().map_err(error_response)?;
    let result = state
        .service
        .validate_step(&draft, request.step)
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(StepValidationResponse {
        step: result.step.number(),
        valid: result.valid,
        missing_fields: result
            .missing_fields
            .into_iter()
            .map(String::from)
            .collect(),
    })))
}

/// List bookings (admin)
///
/// Newest first, optionally filtered by status and service date.
#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings",
    tag = "Bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "One page of bookings", body = ApiResponse<PaginatedResponse<BookingResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<BookingResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(BookingStatus::parse(raw).ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(format!("unknown status '{}'", raw))),
            )
        })?),
    };

    let filter = BookingFilter {
        status,
        preferred_date: query.date,
    };
    let (bookings, total) = state
        .service
        .list(filter, query.page, query.limit)
        .await
        .map_err(error_response)?;

    let items: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        query.page,
        query.limit,
    ))))
}

/// Get one booking (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = String, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "The booking", body = ApiResponse<BookingResponse>),
        (status = 404, description = "No such booking")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let booking = state.service.get(&id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Change a booking status (admin)
///
/// Any status can move to any other status, so a cancelled job can be
/// reopened after a phone call.
#[utoipa::path(
    put,
    path = "/api/v1/admin/bookings/{id}/status",
    tag = "Bookings",
    params(
        ("id" = String, Path, description = "Booking id")
    ),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Updated booking", body = ApiResponse<BookingResponse>),
        (status = 404, description = "No such booking"),
        (status = 422, description = "Unknown status value")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_booking_status(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = BookingStatus::parse(&request.status).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format!(
                "unknown status '{}'",
                request.status
            ))),
        )
    })?;

    let booking = state
        .service
        .update_status(&id, status)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}
