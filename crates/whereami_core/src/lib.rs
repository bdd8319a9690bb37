pub mod blobs;
pub mod capture;
pub mod context;
pub mod domain;
pub mod download;
pub mod focus;
pub mod location;
pub mod map;
pub mod panel;
pub mod ports;
pub mod store;
pub mod view;

#[cfg(test)]
mod test_util;

pub use capture::{capture_photo, CaptureError};
pub use context::{AppContext, ContextSettings};
pub use domain::{CapturedFile, Coordinate, CoordinateError, ImageHandle, PhotoId, PhotoRecord};
pub use download::{save_to_device, Download};
pub use focus::{FocusPlan, FocusTicket, ViewCommand};
pub use ports::{AddressResolver, Clock, PortError, PortResult, SystemClock};

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Session state stays usable after a panicked writer; every mutation is a
// single push/replace, so a poisoned guard never exposes a half-applied change.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
