//! WebSocket endpoint for real-time notifications
//!
//! Admin dashboards connect here and receive the events published on the
//! shared bus, optionally filtered by event type.

use std::collections::HashSet;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use serde::Deserialize;

use super::event_bus::SharedEventBus;

/// State shared with the notifications WebSocket handler
#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
}

/// Create the notification state from a shared event bus
pub fn create_notification_state(event_bus: SharedEventBus) -> NotificationState {
    NotificationState { event_bus }
}

/// Query parameters accepted by the WebSocket endpoint
#[derive(Debug, Default, Deserialize)]
pub struct NotificationFilter {
    /// Comma-separated list of event types to receive; empty means all
    pub event_types: Option<String>,
}

impl NotificationFilter {
    fn event_type_set(&self) -> Option<HashSet<String>> {
        self.event_types.as_ref().map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

/// Handler upgrading the connection and streaming events
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    Query(filter): Query<NotificationFilter>,
    State(state): State<NotificationState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, filter))
}

async fn handle_socket(socket: WebSocket, state: NotificationState, filter: NotificationFilter) {
    let allowed_types = filter.event_type_set();
    info!(
        "Notification client connected, filter={:?}",
        filter.event_types
    );

    let mut subscriber = state.event_bus.subscribe();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = subscriber.recv() => {
                let Some(message) = event else {
                    debug!("Event bus closed, dropping notification client");
                    break;
                };

                if let Some(types) = &allowed_types {
                    if !types.contains(message.event.event_type()) {
                        continue;
                    }
                }

                let payload = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize event message: {}", e);
                        continue;
                    }
                };

                if sink.send(Message::Text(payload.into())).await.is_err() {
                    debug!("Notification client went away");
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Notification client closed the connection");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sink.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {
                        // Clients only listen; ignore anything else they send
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error from notification client: {}", e);
                        break;
                    }
                }
            }
        }
    }

    info!("Notification client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_comma_separated_types() {
        let filter = NotificationFilter {
            event_types: Some("booking_received, contact_received".to_string()),
        };
        let set = filter.event_type_set().unwrap();
        assert!(set.contains("booking_received"));
        assert!(set.contains("contact_received"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn no_filter_means_all_events() {
        let filter = NotificationFilter { event_types: None };
        assert!(filter.event_type_set().is_none());
    }
}
