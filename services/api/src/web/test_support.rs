//! Fakes shared by the web layer's tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;
use whereami_core::{
    domain::Coordinate,
    ports::{address_or_fallback, AddressResolver, PortError, PortResult},
};

/// Answers every lookup the same way without touching the network.
pub struct StaticResolver {
    display_name: Option<String>,
    fail: bool,
}

impl StaticResolver {
    pub fn answering(display_name: &str) -> Self {
        Self {
            display_name: Some(display_name.to_string()),
            fail: false,
        }
    }

    pub fn without_name() -> Self {
        Self {
            display_name: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            display_name: None,
            fail: true,
        }
    }
}

#[async_trait]
impl AddressResolver for StaticResolver {
    async fn reverse_geocode(&self, _at: Coordinate) -> PortResult<String> {
        if self.fail {
            return Err(PortError::UpstreamStatus(503));
        }
        Ok(address_or_fallback(self.display_name.clone()))
    }
}

/// Holds every lookup until the gate is opened.
pub struct GatedResolver {
    pub gate: Arc<Notify>,
}

#[async_trait]
impl AddressResolver for GatedResolver {
    async fn reverse_geocode(&self, _at: Coordinate) -> PortResult<String> {
        self.gate.notified().await;
        Ok("Late answer".to_string())
    }
}
