//! Subscription REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::api::handlers::error_response;
use crate::application::{EnrollmentRequest, PlanInput, SubscriptionService};
use crate::domain::{
    BillingCadence, CustomerSubscription, SubscriptionPlan, SubscriptionStatus,
};

/// State for the subscription handlers
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub service: Arc<SubscriptionService>,
}

/// A wash-club plan
#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    /// URL-friendly identifier, unique across plans
    pub slug: String,
    pub description: Option<String>,
    /// Price per billing period in whole US dollars
    pub price: i64,
    /// `monthly`, `quarterly` or `yearly`
    pub billing_cadence: String,
    /// Marketing bullet points shown on the plans page
    pub features: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionPlan> for PlanResponse {
    fn from(p: SubscriptionPlan) -> Self {
        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            billing_cadence: p.billing_cadence.to_string(),
            features: p.features,
            is_active: p.is_active,
            sort_order: p.sort_order,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Plan create/replace request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlanRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub slug: String,
    pub description: Option<String>,
    /// Price per billing period in whole US dollars
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
    /// `monthly`, `quarterly` or `yearly`
    pub billing_cadence: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

impl PlanRequest {
    fn into_input(self) -> Result<PlanInput, (StatusCode, Json<ApiResponse<()>>)> {
        let billing_cadence = BillingCadence::parse(&self.billing_cadence).ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(format!(
                    "unknown billing cadence '{}'",
                    self.billing_cadence
                ))),
            )
        })?;
        Ok(PlanInput {
            name: self.name,
            slug: self.slug,
            description: self.description,
            price: self.price,
            billing_cadence,
            features: self.features,
            is_active: self.is_active,
            sort_order: self.sort_order,
        })
    }
}

/// Enrollment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "plan_id": "0b7a9e6c-4a7f-4f3e-9be4-6f2a9a5b1c8d",
    "customer_name": "Dana Reyes",
    "email": "dana@example.com",
    "phone": "555-0142",
    "vehicle": "2021 Subaru Outback"
}))]
pub struct EnrollRequest {
    pub plan_id: String,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub customer_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "must be 1-30 characters"))]
    pub phone: String,
    pub vehicle: Option<String>,
}

/// A customer subscription
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: String,
    pub plan_id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle: Option<String>,
    /// `monthly`, `quarterly` or `yearly`, fixed at enrollment time
    pub billing_cycle: String,
    pub next_billing_date: NaiveDate,
    /// `active`, `paused` or `cancelled`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerSubscription> for SubscriptionResponse {
    fn from(s: CustomerSubscription) -> Self {
        Self {
            id: s.id,
            plan_id: s.plan_id,
            customer_name: s.customer_name,
            email: s.email,
            phone: s.phone,
            vehicle: s.vehicle,
            billing_cycle: s.billing_cycle.to_string(),
            next_billing_date: s.next_billing_date,
            status: s.status.to_string(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Filters for the admin subscription list
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SubscriptionListQuery {
    /// Filter by status: `active`, `paused`, `cancelled`
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
pub struct UpdateSubscriptionStatusRequest {
    /// `active`, `paused` or `cancelled`
    pub status: String,
}

/// List wash-club plans
///
/// Active plans only, for the public plans page.
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/plans",
    tag = "Subscriptions",
    responses(
        (status = 200, description = "Active plans", body = ApiResponse<Vec<PlanResponse>>)
    )
)]
pub async fn list_plans(
    State(state): State<SubscriptionAppState>,
) -> Result<Json<ApiResponse<Vec<PlanResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let plans = state
        .service
        .list_public_plans()
        .await
        .map_err(error_response)?;
    let responses: Vec<PlanResponse> = plans.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Enroll in a plan
///
/// The billing cycle is copied from the plan at enrollment, so later plan
/// edits never change what an existing member is billed.
#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment created", body = ApiResponse<SubscriptionResponse>),
        (status = 404, description = "No such plan"),
        (status = 422, description = "Invalid input or plan not open for enrollment")
    )
)]
pub async fn enroll(
    State(state): State<SubscriptionAppState>,
    ValidatedJson(request): ValidatedJson<EnrollRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriptionResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let subscription = state
        .service
        .enroll(EnrollmentRequest {
            plan_id: request.plan_id,
            customer_name: request.customer_name,
            email: request.email,
            phone: request.phone,
            vehicle: request.vehicle,
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(subscription.into())),
    ))
}

/// List subscriptions (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/subscriptions",
    tag = "Subscriptions",
    params(SubscriptionListQuery),
    responses(
        (status = 200, description = "One page of subscriptions", body = ApiResponse<PaginatedResponse<SubscriptionResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_subscriptions(
    State(state): State<SubscriptionAppState>,
    Query(query): Query<SubscriptionListQuery>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<SubscriptionResponse>>>,
    (StatusCode, Json<ApiResponse<()>>),
> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(SubscriptionStatus::parse(raw).ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(format!("unknown status '{}'", raw))),
            )
        })?),
    };

    let (subscriptions, total) = state
        .service
        .list(status, query.page, query.limit)
        .await
        .map_err(error_response)?;

    let items: Vec<SubscriptionResponse> = subscriptions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        query.page,
        query.limit,
    ))))
}

/// Change a subscription status (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/subscriptions/{id}/status",
    tag = "Subscriptions",
    params(
        ("id" = String, Path, description = "Subscription id")
    ),
    request_body = UpdateSubscriptionStatusRequest,
    responses(
        (status = 200, description = "Updated subscription", body = ApiResponse<SubscriptionResponse>),
        (status = 404, description = "No such subscription"),
        (status = 422, description = "Unknown status value")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_subscription_status(
    State(state): State<SubscriptionAppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSubscriptionStatusRequest>,
) -> Result<Json<ApiResponse<SubscriptionResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = SubscriptionStatus::parse(&request.status).ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format!(
                "unknown status '{}'",
                request.status
            ))),
        )
    })?;

    let subscription = state
        .service
        .update_status(&id, status)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(subscription.into())))
}

/// Create a plan (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/subscriptions/plans",
    tag = "Subscriptions",
    request_body = PlanRequest,
    responses(
        (status = 201, description = "Plan created", body = ApiResponse<PlanResponse>),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Invalid input")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_plan(
    State(state): State<SubscriptionAppState>,
    ValidatedJson(request): ValidatedJson<PlanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let input = request.into_input()?;
    let plan = state
        .service
        .create_plan(input)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(plan.into()))))
}

/// Replace a plan (admin)
///
/// Existing members keep the billing cycle they enrolled with.
#[utoipa::path(
    put,
    path = "/api/v1/admin/subscriptions/plans/{id}",
    tag = "Subscriptions",
    params(
        ("id" = String, Path, description = "Plan id")
    ),
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Updated plan", body = ApiResponse<PlanResponse>),
        (status = 404, description = "No such plan"),
        (status = 409, description = "Slug already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_plan(
    State(state): State<SubscriptionAppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<PlanRequest>,
) -> Result<Json<ApiResponse<PlanResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let input = request.into_input()?;
    let plan = state
        .service
        .update_plan(&id, input)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(plan.into())))
}
