//! REST API module for the AquaShine backend
//!
//! Public endpoints for the marketing site (catalog, quotes, bookings,
//! contacts, gallery, plans, content) and JWT-protected admin endpoints.

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{create_api_router, AdminUnifiedState};
