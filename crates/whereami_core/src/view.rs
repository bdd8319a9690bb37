//! crates/whereami_core/src/view.rs
//!
//! Pure render functions turning a photo record into toolkit-independent view
//! descriptors for the map popup and the list panel.

use crate::domain::{Coordinate, PhotoId, PhotoRecord};

pub const SAVE_ACTION_LABEL: &str = "💾 Simpan ke Device";
pub const EMPTY_LIST_PLACEHOLDER: &str = "Belum ada gambar. Jom snap!";

/// Number of comma-separated address components shown in a popup.
const POPUP_ADDRESS_PARTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub image_href: String,
    pub captured_at: String,
    pub address: String,
    pub save_action: SaveAction,
}

/// Button that saves the photo bound to `photo_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveAction {
    pub photo_id: PhotoId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub photo_id: PhotoId,
    pub position: Coordinate,
    pub popup: PopupView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntryView {
    pub photo_id: PhotoId,
    pub image_href: String,
    pub captured_at: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub is_open: bool,
    /// Most recent first.
    pub entries: Vec<ListEntryView>,
    pub empty_placeholder: Option<String>,
}

/// Keeps the first three comma-separated components of an address.
pub fn short_address(address: &str) -> String {
    address
        .split(',')
        .take(POPUP_ADDRESS_PARTS)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn render_marker(record: &PhotoRecord) -> MarkerView {
    MarkerView {
        photo_id: record.id,
        position: record.coordinate,
        popup: PopupView {
            image_href: record.image.href.clone(),
            captured_at: record.captured_at.clone(),
            address: format!("📍 {}", short_address(&record.address)),
            save_action: SaveAction {
                photo_id: record.id,
                label: SAVE_ACTION_LABEL.to_string(),
            },
        },
    }
}

pub fn render_list_entry(record: &PhotoRecord) -> ListEntryView {
    ListEntryView {
        photo_id: record.id,
        image_href: record.image.href.clone(),
        captured_at: record.captured_at.clone(),
        address: record.address.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(address: &str) -> PhotoRecord {
        crate::test_util::record(
            1_700_000_000_000,
            Coordinate {
                lat: 3.1390,
                lon: 101.6869,
            },
            address,
        )
    }

    #[test]
    fn short_address_keeps_three_components() {
        assert_eq!(
            short_address("Jalan Ampang, Kuala Lumpur, Malaysia"),
            "Jalan Ampang, Kuala Lumpur, Malaysia"
        );
        assert_eq!(
            short_address("KLCC, Jalan Ampang, Kampung Baru, Kuala Lumpur, 50088, Malaysia"),
            "KLCC, Jalan Ampang, Kampung Baru"
        );
        assert_eq!(short_address("Lokasi Cantik"), "Lokasi Cantik");
    }

    #[test]
    fn marker_popup_carries_truncated_address_and_save_action() {
        let record = record("A, B, C, D");
        let marker = render_marker(&record);

        assert_eq!(marker.position, record.coordinate);
        assert_eq!(marker.popup.address, "📍 A, B, C");
        assert_eq!(marker.popup.image_href, record.image.href);
        assert_eq!(
            marker.popup.save_action,
            SaveAction {
                photo_id: record.id,
                label: SAVE_ACTION_LABEL.to_string()
            }
        );
    }

    #[test]
    fn list_entry_keeps_full_address() {
        let entry = render_list_entry(&record("A, B, C, D"));
        assert_eq!(entry.address, "A, B, C, D");
        assert_eq!(entry.photo_id, PhotoId(1_700_000_000_000));
    }
}
