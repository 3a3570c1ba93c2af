//! PNG output of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so that builds which only need
//! the in-memory surface do not pull in the `image` crate.

use constellation_core::error::FieldError;
use std::path::Path;

use crate::pixel::Raster;

/// Writes the raster as an RGBA PNG.
///
/// Returns `FieldError::Io` on encode or write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FieldError> {
    let img = image::RgbaImage::from_raw(raster.width_px(), raster.height_px(), raster.data().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::debug!("wrote {}x{} snapshot to {}", raster.width_px(), raster.height_px(), path.display());
    Ok(())
}
