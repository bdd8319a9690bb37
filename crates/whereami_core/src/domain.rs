//! crates/whereami_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any rendering toolkit or serialization format.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Address used when the geocoder answers without a `display_name`.
pub const FALLBACK_ADDRESS: &str = "Lokasi Cantik";

//=========================================================================================
// Coordinates
//=========================================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting NaN and out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

//=========================================================================================
// Captured files and image handles
//=========================================================================================

/// The raw file a user picked from the camera or file picker.
#[derive(Debug, Clone)]
pub struct CapturedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A session-only reference to displayable image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    pub id: Uuid,
    pub href: String,
}

//=========================================================================================
// Photo records
//=========================================================================================

/// Identifier of a photo record: milliseconds since the Unix epoch at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhotoId(pub i64);

impl PhotoId {
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One captured, geotagged photo. Immutable once stored.
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub coordinate: Coordinate,
    pub image: ImageHandle,
    pub original_file: CapturedFile,
    pub address: String,
    /// Localized, display-only.
    pub captured_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn coordinate_accepts_boundaries() {
        assert_ok!(Coordinate::new(90.0, -180.0));
        assert_ok!(Coordinate::new(3.1390, 101.6869));
    }

    #[test]
    fn coordinate_rejects_out_of_range_and_nan() {
        assert_err!(Coordinate::new(90.5, 0.0));
        assert_err!(Coordinate::new(0.0, 181.0));
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0),
            Err(CoordinateError::Latitude(_))
        ));
    }

    #[test]
    fn photo_id_is_epoch_millis() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(PhotoId::from_timestamp(at), PhotoId(1_700_000_000_123));
        assert_eq!(PhotoId(42).to_string(), "42");
    }
}
