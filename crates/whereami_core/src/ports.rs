//! crates/whereami_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the concrete geocoding service and of wall-clock time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Coordinate, FALLBACK_ADDRESS};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, parsing).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Upstream service returned status {0}")]
    UpstreamStatus(u16),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Turns a coordinate into a human-readable place description.
    ///
    /// A response without a usable name resolves to [`FALLBACK_ADDRESS`];
    /// transport and parse failures are returned as errors.
    async fn reverse_geocode(&self, at: Coordinate) -> PortResult<String>;
}

/// Picks the resolved display name, or the fallback when it is absent or empty.
pub fn address_or_fallback(display_name: Option<String>) -> String {
    display_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_ADDRESS.to_string())
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_applies_to_missing_and_empty_names() {
        assert_eq!(address_or_fallback(None), FALLBACK_ADDRESS);
        assert_eq!(address_or_fallback(Some(String::new())), FALLBACK_ADDRESS);
        assert_eq!(
            address_or_fallback(Some("Jalan Ampang, Kuala Lumpur".into())),
            "Jalan Ampang, Kuala Lumpur"
        );
    }
}
