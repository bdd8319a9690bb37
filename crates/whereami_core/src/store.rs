//! crates/whereami_core/src/store.rs
//!
//! The session's photo record store and the id generator feeding it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::domain::{PhotoId, PhotoRecord};
use crate::{read_lock, write_lock};

/// Append-only, insertion-ordered collection of photo records.
#[derive(Debug, Default)]
pub struct PhotoStore {
    records: RwLock<Vec<Arc<PhotoRecord>>>,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: PhotoRecord) -> Arc<PhotoRecord> {
        let record = Arc::new(record);
        write_lock(&self.records).push(record.clone());
        record
    }

    /// Linear scan by id.
    pub fn find(&self, id: PhotoId) -> Option<Arc<PhotoRecord>> {
        read_lock(&self.records)
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<Arc<PhotoRecord>> {
        read_lock(&self.records).clone()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hands out epoch-millisecond ids, bumping past the last one on collisions.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, at: DateTime<Utc>) -> PhotoId {
        let wanted = PhotoId::from_timestamp(at).0;
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(wanted.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        PhotoId(wanted.max(previous + 1))
    }
}
