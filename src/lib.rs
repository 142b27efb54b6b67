//! # AquaShine Detailing Backend
//!
//! Backend for the AquaShine mobile detailing site: booking wizard with
//! server-side quotes, contact form, before/after gallery, wash-club
//! subscriptions, editable home content and a JWT-protected admin API.
//!
//! ## Architecture
//!
//! - **domain**: Core business entities, the price catalog and the `Storage` trait
//! - **application**: Booking, gallery and subscription services plus the upload cleanup worker
//! - **infrastructure**: SeaORM persistence, object store, graceful shutdown
//! - **api**: REST API with Swagger documentation
//! - **auth**: Shared admin password exchanged for a JWT session token
//! - **notifications**: Real-time WebSocket notifications for the admin UI

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, DatabaseStorage};

// Re-export API router
pub use api::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
