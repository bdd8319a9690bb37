//! services/api/src/web/ws_handler.rs
//!
//! The WebSocket channel a map page keeps open: it streams location fixes and
//! animation-completion reports in, and receives capture events out.

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, Mutex};
use tracing::{error, info, warn};
use whereami_core::{Coordinate, FocusTicket, ViewCommand};

type WsSender = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New WebSocket connection established.");

    // The sender is shared between the event forwarder and the reply path.
    let (sender, mut receiver) = socket.split();
    let ws_sender: WsSender = Arc::new(Mutex::new(sender));

    // --- 1. Forward capture events to this client ---
    let forward_task = {
        let mut events = app_state.events.subscribe();
        let ws_sender = ws_sender.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if send_message(&ws_sender, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("WebSocket client lagged; {} events skipped.", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    // --- 2. Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                if let Some(reply) = handle_text_message(text.as_str(), &app_state) {
                    if send_message(&ws_sender, &reply).await.is_err() {
                        error!("Failed to send reply; closing connection.");
                        break;
                    }
                }
            }
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- 3. Cleanup ---
    forward_task.abort();
    info!("WebSocket connection closed.");
}

/// Applies one client message to the shared context and returns the reply, if any.
pub fn handle_text_message(text: &str, app_state: &AppState) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::LocationFound { lat, lon }) => match Coordinate::new(lat, lon) {
            Ok(at) => {
                app_state.ctx.location_found(at);
                None
            }
            Err(e) => Some(ServerMessage::Error {
                message: e.to_string(),
            }),
        },
        Ok(ClientMessage::AnimationFinished { ticket }) => {
            match app_state.ctx.animation_finished(FocusTicket(ticket)) {
                Some(ViewCommand::OpenPopup { photo_id }) => Some(ServerMessage::OpenPopup {
                    photo_id: photo_id.0,
                }),
                _ => None,
            }
        }
        Err(e) => {
            warn!("Failed to deserialize client message: {}", e);
            Some(ServerMessage::Error {
                message: "Unrecognized message".to_string(),
            })
        }
    }
}

async fn send_message(ws_sender: &WsSender, message: &ServerMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(message).map_err(axum::Error::new)?;
    ws_sender.lock().await.send(Message::Text(json.into())).await
}
