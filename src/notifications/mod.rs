//! Notifications module
//!
//! Provides real-time event notifications via WebSocket for admin clients.
//!
//! # Features
//! - Event bus for pub/sub messaging
//! - WebSocket endpoint for admin dashboards
//! - Filtering by event type
//!
//! # Usage
//! ```ignore
//! use aquashine_detailing::notifications::{create_event_bus, ContactReceivedEvent, Event};
//! use chrono::Utc;
//!
//! // Create event bus
//! let event_bus = create_event_bus();
//!
//! // Publish events
//! event_bus.publish(Event::ContactReceived(ContactReceivedEvent {
//!     contact_id: "7f3a".to_string(),
//!     name: "Dana".to_string(),
//!     subject: Some("Fleet quote".to_string()),
//!     timestamp: Utc::now(),
//! }));
//! ```
//!
//! # WebSocket Endpoint
//! Connect to `/api/v1/notifications/ws` with optional query parameters:
//! - `event_types` - Comma-separated list of event types to receive

pub mod event_bus;
pub mod events;
pub mod websocket;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
pub use websocket::{create_notification_state, ws_notifications_handler, NotificationState};
