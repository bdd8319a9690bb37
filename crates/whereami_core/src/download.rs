//! crates/whereami_core/src/download.rs
//!
//! Saving a captured photo back to the user's device.

use bytes::Bytes;

use crate::context::AppContext;
use crate::domain::PhotoId;

pub const SAVE_TOAST: &str = "Gambar masuk Galeri/Download! 📸✨";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct Download {
    pub photo_id: PhotoId,
    pub file_name: String,
    /// The transient image reference the bytes were taken from.
    pub href: String,
    pub content_type: String,
    pub bytes: Bytes,
    pub toast: String,
}

/// Always `.jpg`, whatever the captured format.
pub fn download_file_name(id: PhotoId) -> String {
    format!("Smart_WhereAmI_{id}.jpg")
}

/// Looks the record up by id and prepares a save-as for its image.
/// Unknown ids yield `None`.
pub fn save_to_device(ctx: &AppContext, id: PhotoId) -> Option<Download> {
    let record = ctx.photo(id)?;
    let (content_type, bytes) = match ctx.blob(record.image.id) {
        Some(blob) => (blob.content_type, blob.bytes),
        None => (
            record.original_file.content_type.clone(),
            record.original_file.bytes.clone(),
        ),
    };

    Some(Download {
        photo_id: id,
        file_name: download_file_name(id),
        href: record.image.href.clone(),
        content_type: content_type.unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
        bytes,
        toast: SAVE_TOAST.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextSettings;
    use crate::domain::Coordinate;
    use crate::test_util::{file, FixedClock};
    use pretty_assertions::assert_eq;

    #[test]
    fn saves_the_original_bytes_under_a_fixed_name() {
        let ctx = AppContext::with_clock(ContextSettings::default(), FixedClock::at_millis(1_234));
        let original = file();
        let record = ctx.commit(
            Coordinate { lat: 1.0, lon: 1.0 },
            ctx.blobs().create(&original),
            original.clone(),
            "Here".into(),
            "now".into(),
        );

        let download = save_to_device(&ctx, record.id).unwrap();

        assert_eq!(download.file_name, "Smart_WhereAmI_1234.jpg");
        assert_eq!(download.href, record.image.href);
        assert_eq!(download.bytes.as_ptr(), original.bytes.as_ptr());
        assert_eq!(download.content_type, "image/jpeg");
        assert_eq!(download.toast, SAVE_TOAST);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let ctx = AppContext::new(ContextSettings::default());
        assert!(save_to_device(&ctx, PhotoId(99)).is_none());
    }
}
