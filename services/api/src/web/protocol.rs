//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser map page and the
//! API server.

use serde::{Deserialize, Serialize};

use crate::web::schema::{ListEntryDto, MarkerDto};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A fix from the browser's geolocation watch.
    LocationFound { lat: f64, lon: f64 },

    /// The fly-to animation of a focus sequence has finished.
    AnimationFinished { ticket: u64 },
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new photo was captured; add its marker and prepend its list entry.
    PhotoAdded {
        marker: MarkerDto,
        entry: ListEntryDto,
    },

    /// Open the popup of this photo's marker.
    OpenPopup { photo_id: i64 },

    /// Reports a problem with the last client message.
    Error { message: String },
}
