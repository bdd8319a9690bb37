//! crates/whereami_core/src/focus.rs
//!
//! Sequencing for "show me this photo": close the panel, fly the map to the
//! photo, and open its popup once the renderer reports the flight is over.

use std::time::Duration;

use crate::domain::{Coordinate, PhotoId, PhotoRecord};
use crate::map::LOCATE_MAX_ZOOM;

pub const FLY_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    ClosePanel,
    FlyTo {
        target: Coordinate,
        zoom: u8,
        duration: Duration,
    },
    OpenPopup {
        photo_id: PhotoId,
    },
}

/// Identifies one focus request; echoed back by the renderer on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct FocusPlan {
    pub ticket: FocusTicket,
    pub commands: Vec<ViewCommand>,
}

#[derive(Debug, Default)]
pub struct FocusCoordinator {
    issued: u64,
    pending: Option<(FocusTicket, PhotoId)>,
}

impl FocusCoordinator {
    /// Starts a focus sequence, superseding any pending one.
    pub fn begin(&mut self, record: &PhotoRecord) -> FocusPlan {
        self.issued += 1;
        let ticket = FocusTicket(self.issued);
        self.pending = Some((ticket, record.id));
        FocusPlan {
            ticket,
            commands: vec![
                ViewCommand::ClosePanel,
                ViewCommand::FlyTo {
                    target: record.coordinate,
                    zoom: LOCATE_MAX_ZOOM,
                    duration: FLY_DURATION,
                },
            ],
        }
    }

    /// Finishes the sequence for `ticket`. Stale or repeated tickets yield nothing.
    pub fn complete(&mut self, ticket: FocusTicket) -> Option<ViewCommand> {
        match self.pending {
            Some((pending, photo_id)) if pending == ticket => {
                self.pending = None;
                Some(ViewCommand::OpenPopup { photo_id })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: i64, lat: f64) -> PhotoRecord {
        crate::test_util::record(id, Coordinate { lat, lon: 100.0 }, "")
    }

    #[test]
    fn popup_opens_only_after_completion() {
        let mut focus = FocusCoordinator::default();
        let plan = focus.begin(&record(1, 3.0));

        assert_eq!(
            plan.commands,
            vec![
                ViewCommand::ClosePanel,
                ViewCommand::FlyTo {
                    target: Coordinate { lat: 3.0, lon: 100.0 },
                    zoom: 18,
                    duration: Duration::from_millis(1500),
                },
            ]
        );
        assert_eq!(
            focus.complete(plan.ticket),
            Some(ViewCommand::OpenPopup { photo_id: PhotoId(1) })
        );
        assert_eq!(focus.complete(plan.ticket), None);
    }

    #[test]
    fn newer_focus_supersedes_pending_one() {
        let mut focus = FocusCoordinator::default();
        let first = focus.begin(&record(1, 3.0));
        let second = focus.begin(&record(2, 4.0));

        assert_eq!(focus.complete(first.ticket), None);
        assert_eq!(
            focus.complete(second.ticket),
            Some(ViewCommand::OpenPopup { photo_id: PhotoId(2) })
        );
    }
}
