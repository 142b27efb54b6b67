//! Authentication module
//!
//! A single shared admin password is exchanged for a short-lived JWT
//! session token.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_session_token, verify_token, AuthError, Claims, JwtConfig};
pub use middleware::{auth_error_response, auth_middleware, AuthState, AuthenticatedAdmin};
pub use password::{hash_password, verify_password, AdminCredentials};
