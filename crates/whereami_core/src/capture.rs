//! crates/whereami_core/src/capture.rs
//!
//! The capture pipeline: file selection + current location + reverse geocoding
//! into a stored, rendered photo record.

use std::sync::Arc;

use crate::context::AppContext;
use crate::domain::{CapturedFile, PhotoRecord};
use crate::ports::{AddressResolver, PortError};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// A file arrived before the first location fix.
    #[error("No location known yet")]
    NoLocation,
    #[error("Address resolution failed: {0}")]
    AddressResolution(#[from] PortError),
}

/// Captures one photo at the current location.
///
/// The image handle is created before the geocoder is called, the record only
/// after it answers. Overlapping captures are not serialized: records land in
/// the store in the order their addresses resolve.
pub async fn capture_photo(
    ctx: &AppContext,
    resolver: &dyn AddressResolver,
    file: CapturedFile,
) -> Result<Arc<PhotoRecord>, CaptureError> {
    let coordinate = ctx.current_location().ok_or(CaptureError::NoLocation)?;
    let image = ctx.blobs().create(&file);
    let captured_at = ctx.format_timestamp(ctx.now());

    let address = match resolver.reverse_geocode(coordinate).await {
        Ok(address) => address,
        Err(e) => {
            ctx.blobs().release(&image);
            return Err(e.into());
        }
    };

    Ok(ctx.commit(coordinate, image, file, address, captured_at))
}
