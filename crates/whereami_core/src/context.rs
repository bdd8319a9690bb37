//! crates/whereami_core/src/context.rs
//!
//! The session-scoped application context. Created once at startup and passed
//! explicitly to every operation; it owns all mutable session state.

use std::fmt::Write;
use std::sync::{Arc, Mutex};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::blobs::{Blob, BlobRegistry};
use crate::domain::{CapturedFile, Coordinate, ImageHandle, PhotoId, PhotoRecord};
use crate::focus::{FocusCoordinator, FocusPlan, FocusTicket, ViewCommand};
use crate::location::LocationTracker;
use crate::map::{MapView, LOCATE_MAX_ZOOM};
use crate::panel::ListPanel;
use crate::ports::{Clock, SystemClock};
use crate::store::{IdGenerator, PhotoStore};
use crate::view::{render_list_entry, render_marker, ListView};
use crate::lock;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %-I:%M:%S %P";
pub const DEFAULT_BLOB_BASE_PATH: &str = "/blobs";

#[derive(Debug, Clone)]
pub struct ContextSettings {
    /// `strftime` pattern for the display-only capture time.
    pub timestamp_format: String,
    pub blob_base_path: String,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            blob_base_path: DEFAULT_BLOB_BASE_PATH.to_string(),
        }
    }
}

/// Returns `false` if chrono cannot render `format`.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

pub struct AppContext {
    location: LocationTracker,
    photos: PhotoStore,
    map: Mutex<MapView>,
    panel: Mutex<ListPanel>,
    focus: Mutex<FocusCoordinator>,
    blobs: BlobRegistry,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    settings: ContextSettings,
}

impl AppContext {
    pub fn new(settings: ContextSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: ContextSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            location: LocationTracker::new(),
            photos: PhotoStore::new(),
            map: Mutex::new(MapView::default()),
            panel: Mutex::new(ListPanel::default()),
            focus: Mutex::new(FocusCoordinator::default()),
            blobs: BlobRegistry::new(settings.blob_base_path.clone()),
            ids: IdGenerator::new(),
            clock,
            settings,
        }
    }

    //=====================================================================================
    // Location
    //=====================================================================================

    pub fn location_found(&self, at: Coordinate) {
        self.location.report(at);
        lock(&self.map).follow_user(at);
    }

    pub fn current_location(&self) -> Option<Coordinate> {
        self.location.current()
    }

    //=====================================================================================
    // Records and views
    //=====================================================================================

    pub fn photos(&self) -> Vec<Arc<PhotoRecord>> {
        self.photos.snapshot()
    }

    pub fn photo(&self, id: PhotoId) -> Option<Arc<PhotoRecord>> {
        self.photos.find(id)
    }

    pub fn map_view(&self) -> MapView {
        lock(&self.map).clone()
    }

    pub fn list_view(&self) -> ListView {
        lock(&self.panel).view()
    }

    pub fn open_panel(&self) {
        lock(&self.panel).open();
    }

    pub fn close_panel(&self) {
        lock(&self.panel).close();
    }

    pub fn blob(&self, id: Uuid) -> Option<Blob> {
        self.blobs.get(id)
    }

    /// Number of live transient image references.
    pub fn image_count(&self) -> usize {
        self.blobs.len()
    }

    //=====================================================================================
    // Focus
    //=====================================================================================

    /// Closes the panel and flies to the photo; the popup waits for
    /// [`AppContext::animation_finished`].
    pub fn focus_photo(&self, id: PhotoId) -> Option<FocusPlan> {
        let record = self.photos.find(id)?;
        let plan = lock(&self.focus).begin(&record);
        self.close_panel();
        lock(&self.map).fly_to(record.coordinate, LOCATE_MAX_ZOOM);
        Some(plan)
    }

    pub fn animation_finished(&self, ticket: FocusTicket) -> Option<ViewCommand> {
        let command = lock(&self.focus).complete(ticket)?;
        if let ViewCommand::OpenPopup { photo_id } = command {
            lock(&self.map).open_popup(photo_id);
        }
        Some(command)
    }

    //=====================================================================================
    // Crate-internal plumbing for the capture pipeline
    //=====================================================================================

    pub(crate) fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        let mut out = String::new();
        let local = at.with_timezone(&Local);
        if write!(out, "{}", local.format(&self.settings.timestamp_format)).is_err() {
            return local.to_rfc3339();
        }
        out
    }

    /// Assigns the id, stores the record and projects it into both views.
    /// The map lock is held throughout so store order, id order and view order agree.
    pub(crate) fn commit(
        &self,
        coordinate: Coordinate,
        image: ImageHandle,
        original_file: CapturedFile,
        address: String,
        captured_at: String,
    ) -> Arc<PhotoRecord> {
        let mut map = lock(&self.map);
        let record = self.photos.append(PhotoRecord {
            id: self.ids.next(self.clock.now()),
            coordinate,
            image,
            original_file,
            address,
            captured_at,
        });
        map.add_marker(render_marker(&record));
        map.open_popup(record.id);
        lock(&self.panel).prepend(render_list_entry(&record));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{file, FixedClock};
    use crate::view::EMPTY_LIST_PLACEHOLDER;
    use pretty_assertions::assert_eq;

    fn context() -> AppContext {
        AppContext::with_clock(ContextSettings::default(), FixedClock::at_millis(1_000))
    }

    #[test]
    fn location_found_moves_user_marker_and_viewport() {
        let ctx = context();
        let here = Coordinate { lat: 3.15, lon: 101.7 };
        ctx.location_found(here);

        let map = ctx.map_view();
        assert_eq!(ctx.current_location(), Some(here));
        assert_eq!(map.user_marker.map(|m| m.position), Some(here));
        assert_eq!(map.viewport.center, here);
    }

    #[test]
    fn commit_projects_record_into_both_views() {
        let ctx = context();
        let image = ctx.blobs().create(&file());
        let record = ctx.commit(
            Coordinate { lat: 1.0, lon: 2.0 },
            image,
            file(),
            "A, B".into(),
            "now".into(),
        );

        let map = ctx.map_view();
        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.open_popup, Some(record.id));
        let list = ctx.list_view();
        assert_eq!(list.entries[0].photo_id, record.id);
        assert_eq!(list.empty_placeholder, None);
    }

    #[test]
    fn focus_closes_panel_and_waits_for_animation() {
        let ctx = context();
        assert!(ctx.focus_photo(PhotoId(1)).is_none());

        let record = ctx.commit(
            Coordinate { lat: 5.0, lon: 6.0 },
            ctx.blobs().create(&file()),
            file(),
            "X".into(),
            "now".into(),
        );
        let other = ctx.commit(
            Coordinate { lat: 7.0, lon: 8.0 },
            ctx.blobs().create(&file()),
            file(),
            "Y".into(),
            "now".into(),
        );
        ctx.open_panel();

        let plan = ctx.focus_photo(record.id).unwrap();
        assert!(!ctx.list_view().is_open);
        assert_eq!(ctx.map_view().viewport.center, record.coordinate);
        assert_eq!(ctx.map_view().open_popup, Some(other.id));

        assert_eq!(
            ctx.animation_finished(plan.ticket),
            Some(ViewCommand::OpenPopup { photo_id: record.id })
        );
        assert_eq!(ctx.map_view().open_popup, Some(record.id));
    }

    #[test]
    fn empty_context_shows_placeholder() {
        let ctx = context();
        assert_eq!(
            ctx.list_view().empty_placeholder.as_deref(),
            Some(EMPTY_LIST_PLACEHOLDER)
        );
    }

    #[test]
    fn timestamp_format_validation() {
        assert!(is_valid_timestamp_format(DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_valid_timestamp_format("%Q"));
    }
}
