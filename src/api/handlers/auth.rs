//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::auth::{create_session_token, AdminCredentials, AuthenticatedAdmin, JwtConfig};

/// Auth state for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub credentials: Arc<AdminCredentials>,
    pub jwt_config: JwtConfig,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "password": "secret123"
}))]
pub struct LoginRequest {
    /// The shared admin password
    pub password: String,
}

/// Successful login response
///
/// The token goes in the `Authorization: Bearer <token>` header on every
/// admin request.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT session token
    pub token: String,
    /// Token type (always `Bearer`)
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Current session info
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Session subject (always `admin`)
    pub subject: String,
    /// Session expiry (Unix timestamp)
    pub expires_at: i64,
}

/// Admin login
///
/// Exchanges the shared admin password for a short-lived JWT session token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded, returns a session token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Wrong password")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    if !state.credentials.verify(&request.password) {
        metrics::counter!("admin_login_failures_total").increment(1);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid credentials")),
        ));
    }

    let token = create_session_token(&state.jwt_config).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to create token: {}", e))),
        )
    })?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_minutes * 60,
    })))
}

/// Current session
///
/// Returns the session behind the presented token. Useful for the admin UI
/// to check whether its stored token is still valid.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session is valid", body = ApiResponse<SessionResponse>),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_session(
    Extension(admin): Extension<AuthenticatedAdmin>,
) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::success(SessionResponse {
        subject: admin.subject,
        expires_at: admin.expires_at,
    }))
}
