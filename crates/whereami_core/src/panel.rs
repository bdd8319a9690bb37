//! crates/whereami_core/src/panel.rs
//!
//! The slide-out photo list panel.

use std::collections::VecDeque;

use crate::view::{ListEntryView, ListView, EMPTY_LIST_PLACEHOLDER};

#[derive(Debug, Default)]
pub struct ListPanel {
    is_open: bool,
    entries: VecDeque<ListEntryView>,
}

impl ListPanel {
    /// Newest entries go on top.
    pub fn prepend(&mut self, entry: ListEntryView) {
        self.entries.push_front(entry);
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn view(&self) -> ListView {
        ListView {
            is_open: self.is_open,
            entries: self.entries.iter().cloned().collect(),
            empty_placeholder: self
                .entries
                .is_empty()
                .then(|| EMPTY_LIST_PLACEHOLDER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhotoId;

    fn entry(id: i64) -> ListEntryView {
        ListEntryView {
            photo_id: PhotoId(id),
            image_href: format!("/blobs/{id}"),
            captured_at: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn placeholder_disappears_after_first_entry() {
        let mut panel = ListPanel::default();
        assert_eq!(
            panel.view().empty_placeholder.as_deref(),
            Some(EMPTY_LIST_PLACEHOLDER)
        );

        panel.prepend(entry(1));
        assert_eq!(panel.view().empty_placeholder, None);
    }

    #[test]
    fn entries_are_reverse_insertion_order() {
        let mut panel = ListPanel::default();
        for id in 1..=5 {
            panel.prepend(entry(id));
        }

        let ids: Vec<i64> = panel.view().entries.iter().map(|e| e.photo_id.0).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn open_and_close_toggle_visibility() {
        let mut panel = ListPanel::default();
        panel.open();
        assert!(panel.view().is_open);
        panel.close();
        assert!(!panel.view().is_open);
    }
}
