//! crates/whereami_core/src/location.rs
//!
//! Keeps the last coordinate reported by the device's location service.

use std::sync::RwLock;

use crate::domain::Coordinate;
use crate::{read_lock, write_lock};

#[derive(Debug, Default)]
pub struct LocationTracker {
    current: RwLock<Option<Coordinate>>,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current fix. Returns `true` if this was the first one.
    pub fn report(&self, at: Coordinate) -> bool {
        write_lock(&self.current).replace(at).is_none()
    }

    pub fn current(&self) -> Option<Coordinate> {
        *read_lock(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_report_wins() {
        let tracker = LocationTracker::new();
        assert_eq!(tracker.current(), None);

        assert!(tracker.report(Coordinate { lat: 1.0, lon: 1.0 }));
        assert!(!tracker.report(Coordinate { lat: 2.0, lon: 3.0 }));
        assert_eq!(tracker.current(), Some(Coordinate { lat: 2.0, lon: 3.0 }));
    }
}
