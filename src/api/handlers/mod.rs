//! API Handlers

pub mod auth;
pub mod bookings;
pub mod contacts;
pub mod content;
pub mod dashboard;
pub mod gallery;
pub mod health;
pub mod metrics;
pub mod services;
pub mod subscriptions;

pub use auth::*;
pub use bookings::*;
pub use contacts::*;
pub use content::*;
pub use dashboard::*;
pub use gallery::*;
pub use health::*;
pub use metrics::*;
pub use services::*;
pub use subscriptions::*;

use axum::{http::StatusCode, Json};

use crate::api::dto::ApiResponse;
use crate::domain::DomainError;

/// Map a domain error to the HTTP error tuple every handler returns
pub(crate) fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) | DomainError::ObjectStore(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiResponse::error(e.to_string())))
}
