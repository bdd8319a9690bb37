//! crates/whereami_core/src/map.rs
//!
//! Map state: viewport, the user's own marker, and one marker per photo.

use crate::domain::{Coordinate, PhotoId};
use crate::view::MarkerView;

pub const INITIAL_CENTER: Coordinate = Coordinate {
    lat: 3.1390,
    lon: 101.6869,
};
pub const INITIAL_ZOOM: u8 = 13;
/// Zoom cap while following the device location, and the focus zoom level.
pub const LOCATE_MAX_ZOOM: u8 = 18;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub url: String,
    pub size: (u32, u32),
    pub anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            url: "https://cdn-icons-png.flaticon.com/512/4899/4899329.png".to_string(),
            size: (45, 45),
            anchor: (22, 45),
            popup_anchor: (0, -40),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserMarker {
    pub position: Coordinate,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub viewport: Viewport,
    pub user_marker: Option<UserMarker>,
    pub markers: Vec<MarkerView>,
    pub open_popup: Option<PhotoId>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            viewport: Viewport {
                center: INITIAL_CENTER,
                zoom: INITIAL_ZOOM,
            },
            user_marker: None,
            markers: Vec::new(),
            open_popup: None,
        }
    }
}

impl MapView {
    /// Places the user marker on the first fix, moves it afterwards, and
    /// follows it with the viewport.
    pub fn follow_user(&mut self, at: Coordinate) {
        self.user_marker
            .get_or_insert_with(|| UserMarker {
                position: at,
                icon: MarkerIcon::default(),
            })
            .position = at;
        self.viewport = Viewport {
            center: at,
            zoom: LOCATE_MAX_ZOOM,
        };
    }

    pub fn add_marker(&mut self, marker: MarkerView) {
        self.markers.push(marker);
    }

    pub fn fly_to(&mut self, target: Coordinate, zoom: u8) {
        self.viewport = Viewport {
            center: target,
            zoom,
        };
    }

    /// Opens the popup of a known marker; one popup at a time.
    pub fn open_popup(&mut self, id: PhotoId) -> bool {
        if self.markers.iter().any(|m| m.photo_id == id) {
            self.open_popup = Some(id);
            true
        } else {
            false
        }
    }
}
