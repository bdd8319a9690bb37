//! Shared fixtures for the crate's unit tests.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CapturedFile, Coordinate, ImageHandle, PhotoId, PhotoRecord};
use crate::ports::Clock;

pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at_millis(millis: i64) -> Arc<Self> {
        Arc::new(Self(DateTime::from_timestamp_millis(millis).unwrap()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn file() -> CapturedFile {
    CapturedFile {
        name: "IMG_0001.jpg".into(),
        content_type: Some("image/jpeg".into()),
        bytes: Bytes::from_static(b"\xff\xd8\xff\xe0fake-jpeg"),
    }
}

pub fn record(id: i64, coordinate: Coordinate, address: &str) -> PhotoRecord {
    PhotoRecord {
        id: PhotoId(id),
        coordinate,
        image: ImageHandle {
            id: Uuid::new_v4(),
            href: format!("/blobs/{id}"),
        },
        original_file: file(),
        address: address.to_string(),
        captured_at: "18/10/2026, 6:00:00 pm".to_string(),
    }
}
