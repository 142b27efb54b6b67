//! Service catalog and quote handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::application::BookingService;
use crate::domain::{AddOn, Quote, QuoteLine, ServiceLocation, ServiceOffering};

/// State for the public catalog endpoints
#[derive(Clone)]
pub struct CatalogState {
    pub booking_service: Arc<BookingService>,
}

/// A bookable detailing service
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    /// Stable service id, e.g. `full-detail`
    pub id: String,
    pub name: String,
    pub description: String,
    /// List price in whole US dollars
    pub base_price: i64,
    /// Rough duration estimate in minutes
    pub duration_minutes: u32,
}

impl From<&ServiceOffering> for ServiceResponse {
    fn from(s: &ServiceOffering) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            description: s.description.clone(),
            base_price: s.base_price,
            duration_minutes: s.duration_minutes,
        }
    }
}

/// An optional extra applied on top of a service
#[derive(Debug, Serialize, ToSchema)]
pub struct AddOnResponse {
    /// Stable add-on id, e.g. `ceramic-coating`
    pub id: String,
    pub name: String,
    /// Price in whole US dollars
    pub price: i64,
}

impl From<&AddOn> for AddOnResponse {
    fn from(a: &AddOn) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            price: a.price,
        }
    }
}

/// Quote request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "service_id": "full-detail",
    "add_on_ids": ["ceramic-coating", "engine-bay"],
    "location": "mobile"
}))]
pub struct QuoteRequest {
    pub service_id: String,
    #[serde(default)]
    pub add_on_ids: Vec<String>,
    /// `shop`, `mobile` or `home`. Default: `shop`
    pub location: Option<String>,
}

/// One priced add-on line inside a quote
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteLineResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl From<QuoteLine> for QuoteLineResponse {
    fn from(line: QuoteLine) -> Self {
        Self {
            id: line.id,
            name: line.name,
            price: line.price,
        }
    }
}

/// Priced breakdown for a service selection
///
/// All amounts in whole US dollars.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub service_id: String,
    pub base_price: i64,
    pub add_ons: Vec<QuoteLineResponse>,
    /// 25 when the mobile rig is dispatched, otherwise 0
    pub location_surcharge: i64,
    pub total: i64,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            service_id: q.service_id,
            base_price: q.base_price,
            add_ons: q.add_ons.into_iter().map(Into::into).collect(),
            location_surcharge: q.location_surcharge,
            total: q.total,
        }
    }
}

/// List all detailing services
#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "Services",
    responses(
        (status = 200, description = "The service catalog", body = ApiResponse<Vec<ServiceResponse>>)
    )
)]
pub async fn list_services(
    State(state): State<CatalogState>,
) -> Json<ApiResponse<Vec<ServiceResponse>>> {
    let services: Vec<ServiceResponse> = state
        .booking_service
        .catalog()
        .services()
        .iter()
        .map(Into::into)
        .collect();
    Json(ApiResponse::success(services))
}

/// List all add-ons
#[utoipa::path(
    get,
    path = "/api/v1/services/add-ons",
    tag = "Services",
    responses(
        (status = 200, description = "The add-on catalog", body = ApiResponse<Vec<AddOnResponse>>)
    )
)]
pub async fn list_add_ons(
    State(state): State<CatalogState>,
) -> Json<ApiResponse<Vec<AddOnResponse>>> {
    let add_ons: Vec<AddOnResponse> = state
        .booking_service
        .catalog()
        .add_ons()
        .iter()
        .map(Into::into)
        .collect();
    Json(ApiResponse::success(add_ons))
}

/// Price a service selection
///
/// Returns the same breakdown the booking wizard shows. Unknown service or
/// add-on ids contribute 0 rather than failing, so a stale client catalog
/// never blocks a quote.
#[utoipa::path(
    post,
    path = "/api/v1/services/quote",
    tag = "Services",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Priced breakdown", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn quote_selection(
    State(state): State<CatalogState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let location = match request.location.as_deref() {
        None => ServiceLocation::Shop,
        Some(raw) => ServiceLocation::parse(raw).ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(format!("unknown location '{}'", raw))),
            )
        })?,
    };

    let quote =
        state
            .booking_service
            .catalog()
            .quote(&request.service_id, &request.add_on_ids, location);
    Ok(Json(ApiResponse::success(quote.into())))
}
