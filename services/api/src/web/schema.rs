//! services/api/src/web/schema.rs
//!
//! Serializable projections of the core view descriptors. The core stays free of
//! any wire format; everything the browser sees is shaped here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use whereami_core::{
    domain::{Coordinate, PhotoRecord},
    focus::{FocusPlan, ViewCommand},
    map::{MapView, MarkerIcon, UserMarker, Viewport},
    view::{ListEntryView, ListView, MarkerView, PopupView, SaveAction},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for CoordinateDto {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat,
            lon: c.lon,
        }
    }
}

//=========================================================================================
// Map
//=========================================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaveActionDto {
    pub photo_id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopupDto {
    pub image_href: String,
    pub captured_at: String,
    pub address: String,
    pub save_action: SaveActionDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarkerDto {
    pub photo_id: i64,
    pub position: CoordinateDto,
    pub popup: PopupDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarkerIconDto {
    pub url: String,
    pub size: Vec<u32>,
    pub anchor: Vec<i32>,
    pub popup_anchor: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserMarkerDto {
    pub position: CoordinateDto,
    pub icon: MarkerIconDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViewportDto {
    pub center: CoordinateDto,
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapViewDto {
    pub viewport: ViewportDto,
    pub user_marker: Option<UserMarkerDto>,
    pub markers: Vec<MarkerDto>,
    pub open_popup: Option<i64>,
}

impl From<SaveAction> for SaveActionDto {
    fn from(a: SaveAction) -> Self {
        Self {
            photo_id: a.photo_id.0,
            label: a.label,
        }
    }
}

impl From<PopupView> for PopupDto {
    fn from(p: PopupView) -> Self {
        Self {
            image_href: p.image_href,
            captured_at: p.captured_at,
            address: p.address,
            save_action: p.save_action.into(),
        }
    }
}

impl From<MarkerView> for MarkerDto {
    fn from(m: MarkerView) -> Self {
        Self {
            photo_id: m.photo_id.0,
            position: m.position.into(),
            popup: m.popup.into(),
        }
    }
}

impl From<MarkerIcon> for MarkerIconDto {
    fn from(i: MarkerIcon) -> Self {
        Self {
            url: i.url,
            size: vec![i.size.0, i.size.1],
            anchor: vec![i.anchor.0, i.anchor.1],
            popup_anchor: vec![i.popup_anchor.0, i.popup_anchor.1],
        }
    }
}

impl From<UserMarker> for UserMarkerDto {
    fn from(u: UserMarker) -> Self {
        Self {
            position: u.position.into(),
            icon: u.icon.into(),
        }
    }
}

impl From<Viewport> for ViewportDto {
    fn from(v: Viewport) -> Self {
        Self {
            center: v.center.into(),
            zoom: v.zoom,
        }
    }
}

impl From<MapView> for MapViewDto {
    fn from(m: MapView) -> Self {
        Self {
            viewport: m.viewport.into(),
            user_marker: m.user_marker.map(Into::into),
            markers: m.markers.into_iter().map(Into::into).collect(),
            open_popup: m.open_popup.map(|id| id.0),
        }
    }
}

//=========================================================================================
// List panel
//=========================================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListEntryDto {
    pub photo_id: i64,
    pub image_href: String,
    pub captured_at: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListViewDto {
    pub is_open: bool,
    pub entries: Vec<ListEntryDto>,
    pub empty_placeholder: Option<String>,
}

impl From<ListEntryView> for ListEntryDto {
    fn from(e: ListEntryView) -> Self {
        Self {
            photo_id: e.photo_id.0,
            image_href: e.image_href,
            captured_at: e.captured_at,
            address: e.address,
        }
    }
}

impl From<ListView> for ListViewDto {
    fn from(l: ListView) -> Self {
        Self {
            is_open: l.is_open,
            entries: l.entries.into_iter().map(Into::into).collect(),
            empty_placeholder: l.empty_placeholder,
        }
    }
}

//=========================================================================================
// Photos
//=========================================================================================

/// The response payload sent after a successful capture.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoResponse {
    pub id: i64,
    pub coordinate: CoordinateDto,
    pub address: String,
    pub captured_at: String,
    pub image_href: String,
    pub marker: MarkerDto,
    pub entry: ListEntryDto,
}

impl From<&PhotoRecord> for PhotoResponse {
    fn from(record: &PhotoRecord) -> Self {
        Self {
            id: record.id.0,
            coordinate: record.coordinate.into(),
            address: record.address.clone(),
            captured_at: record.captured_at.clone(),
            image_href: record.image.href.clone(),
            marker: whereami_core::view::render_marker(record).into(),
            entry: whereami_core::view::render_list_entry(record).into(),
        }
    }
}

//=========================================================================================
// Focus
//=========================================================================================

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewCommandDto {
    ClosePanel,
    FlyTo {
        target: CoordinateDto,
        zoom: u8,
        duration_ms: u64,
    },
    OpenPopup {
        photo_id: i64,
    },
}

impl From<ViewCommand> for ViewCommandDto {
    fn from(c: ViewCommand) -> Self {
        match c {
            ViewCommand::ClosePanel => Self::ClosePanel,
            ViewCommand::FlyTo {
                target,
                zoom,
                duration,
            } => Self::FlyTo {
                target: target.into(),
                zoom,
                duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            },
            ViewCommand::OpenPopup { photo_id } => Self::OpenPopup {
                photo_id: photo_id.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FocusPlanDto {
    /// Echo this back once the fly-to animation has finished.
    pub ticket: u64,
    pub commands: Vec<ViewCommandDto>,
}

impl From<FocusPlan> for FocusPlanDto {
    fn from(p: FocusPlan) -> Self {
        Self {
            ticket: p.ticket.0,
            commands: p.commands.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnimationFinishedRequest {
    pub ticket: u64,
}
