//! PNG output of a [`RasterSurface`].
//!
//! Feature-gated behind `png` (default on) so the raster host can be used
//! without pulling in the `image` crate. The pixel conversion itself lives
//! in [`crate::pixel`].

use chaos_cycle_core::error::SimError;
use std::path::Path;

use crate::canvas::RasterSurface;
use crate::pixel::surface_to_rgba;

/// Writes the surface as an RGBA PNG.
///
/// Returns `SimError::InvalidBounds` if a dimension overflows `u32`, or
/// `SimError::Io` on write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), SimError> {
    let too_large = || SimError::InvalidBounds {
        width: surface.width() as f64,
        height: surface.height() as f64,
    };
    let w = u32::try_from(surface.width()).map_err(|_| too_large())?;
    let h = u32::try_from(surface.height()).map_err(|_| too_large())?;
    let img = image::RgbaImage::from_raw(w, h, surface_to_rgba(surface))
        .ok_or_else(|| SimError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SimError::Io(e.to_string()))?;
    log::debug!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}
