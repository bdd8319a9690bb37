//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::protocol::ServerMessage;
use std::sync::Arc;
use tokio::sync::broadcast;
use whereami_core::{ports::AddressResolver, AppContext, ContextSettings};

/// How many unsent events a slow WebSocket client may fall behind by.
const EVENT_BUFFER: usize = 64;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub resolver: Arc<dyn AddressResolver>,
    pub config: Arc<Config>,
    /// Fan-out of capture events to every connected WebSocket.
    pub events: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(config: Arc<Config>, resolver: Arc<dyn AddressResolver>) -> Self {
        let settings = ContextSettings {
            timestamp_format: config.timestamp_format.clone(),
            ..ContextSettings::default()
        };
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            ctx: Arc::new(AppContext::new(settings)),
            resolver,
            config,
            events,
        }
    }
}
