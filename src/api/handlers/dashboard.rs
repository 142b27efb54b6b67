//! Admin dashboard handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::error_response;
use crate::domain::{BookingStatus, ContactStatus, Storage, SubscriptionStatus};

/// State for the dashboard handlers
#[derive(Clone)]
pub struct DashboardAppState {
    pub storage: Arc<dyn Storage>,
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    /// All bookings ever submitted
    pub total_bookings: u64,
    /// Bookings awaiting confirmation
    pub pending_bookings: u64,
    /// Contact submissions nobody has looked at yet
    pub new_contacts: u64,
    /// Currently active wash-club memberships
    pub active_subscriptions: u64,
    /// Gallery entries visible on the public site
    pub active_gallery_images: u64,
}

/// Dashboard stats (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Headline numbers", body = ApiResponse<DashboardStats>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard_stats(
    State(state): State<DashboardAppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, (StatusCode, Json<ApiResponse<()>>)> {
    let total_bookings = state
        .storage
        .count_bookings(None)
        .await
        .map_err(error_response)?;
    let pending_bookings = state
        .storage
        .count_bookings(Some(BookingStatus::Pending))
        .await
        .map_err(error_response)?;
    let new_contacts = state
        .storage
        .count_contacts(Some(ContactStatus::New))
        .await
        .map_err(error_response)?;
    let active_subscriptions = state
        .storage
        .count_subscriptions(Some(SubscriptionStatus::Active))
        .await
        .map_err(error_response)?;
    let active_gallery_images = state
        .storage
        .count_gallery_images(true)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(DashboardStats {
        total_bookings,
        pending_bookings,
        new_contacts,
        active_subscriptions,
        active_gallery_images,
    })))
}
