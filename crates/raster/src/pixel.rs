//! Pure-computation pixel buffer conversion from a [`RasterSurface`].
//!
//! Always available (no feature gate) so callers without the `png` feature
//! can still hand the frame to their own encoder.

use crate::canvas::RasterSurface;

/// Converts the surface to an RGBA8 buffer of length `width * height * 4`.
///
/// Components are clamped and rounded; alpha is always 255.
pub fn surface_to_rgba(surface: &RasterSurface) -> Vec<u8> {
    surface
        .pixels()
        .iter()
        .flat_map(|&srgb| {
            let [r, g, b] = srgb.to_rgb8();
            [r, g, b, 255u8]
        })
        .collect()
}
