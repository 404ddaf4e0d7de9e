//! WebSocket fanout of store change events
//!
//! Clients connect to /ws and receive a JSON message whenever a durable
//! collection or the live match slot changes. The channel is one-way:
//! inbound text is ignored, mutations go through the HTTP API.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};

use crate::event::{collections, EventBus, StoreEvent};
use crate::shared::AppState;

#[instrument(skip(ws, state))]
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.event_bus.clone()))
}

async fn handle_socket(socket: WebSocket, event_bus: EventBus) {
    let (mut sender, mut receiver) = socket.split();

    let mut players_rx = event_bus.subscribe(collections::PLAYERS).await;
    let mut matches_rx = event_bus.subscribe(collections::MATCHES).await;
    let mut settings_rx = event_bus.subscribe(collections::SETTINGS).await;
    let mut current_rx = event_bus.subscribe(collections::CURRENT_MATCH).await;

    debug!("Notify client connected");

    loop {
        let event: Result<StoreEvent, broadcast::error::RecvError> = tokio::select! {
            // Client side only matters for detecting disconnect
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        debug!(error = %e, "Notify client receive error");
                        break;
                    }
                }
            }
            event = players_rx.recv() => event,
            event = matches_rx.recv() => event,
            event = settings_rx.recv() => event,
            event = current_rx.recv() => event,
        };

        match event {
            Ok(event) => {
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(error = %e, "Failed to encode store event");
                        continue;
                    }
                };
                if sender.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Notify client lagging, events dropped");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    debug!("Notify client disconnected");
}
