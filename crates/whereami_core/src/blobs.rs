//! crates/whereami_core/src/blobs.rs
//!
//! Transient image references. A handle shares the captured bytes rather than
//! copying or re-encoding them, and is only meaningful for the current session.

use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{CapturedFile, ImageHandle};
use crate::{read_lock, write_lock};

#[derive(Debug, Clone)]
pub struct Blob {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug)]
pub struct BlobRegistry {
    base_path: String,
    blobs: RwLock<HashMap<Uuid, Blob>>,
}

impl BlobRegistry {
    /// `base_path` prefixes every handle's `href`, e.g. `/blobs`.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into().trim_end_matches('/').to_string(),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self, file: &CapturedFile) -> ImageHandle {
        let id = Uuid::new_v4();
        write_lock(&self.blobs).insert(
            id,
            Blob {
                content_type: file.content_type.clone(),
                bytes: file.bytes.clone(),
            },
        );
        ImageHandle {
            id,
            href: format!("{}/{}", self.base_path, id),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Blob> {
        read_lock(&self.blobs).get(&id).cloned()
    }

    pub fn release(&self, handle: &ImageHandle) {
        write_lock(&self.blobs).remove(&handle.id);
    }

    pub fn len(&self) -> usize {
        read_lock(&self.blobs).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> CapturedFile {
        CapturedFile {
            name: "IMG_0001.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: Bytes::from_static(b"\xff\xd8\xff\xe0"),
        }
    }

    #[test]
    fn handle_shares_original_bytes() {
        let registry = BlobRegistry::new("/blobs/");
        let file = file();
        let handle = registry.create(&file);

        assert_eq!(handle.href, format!("/blobs/{}", handle.id));
        let blob = registry.get(handle.id).unwrap();
        assert_eq!(blob.bytes.as_ptr(), file.bytes.as_ptr());
        assert_eq!(blob.content_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn release_forgets_the_handle() {
        let registry = BlobRegistry::new("/blobs");
        let handle = registry.create(&file());
        registry.release(&handle);

        assert!(registry.get(handle.id).is_none());
        assert!(registry.is_empty());
    }
}
