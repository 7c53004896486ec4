//! An in-memory RGB surface that particles are painted onto.
//!
//! Pixels are stored row-major as [`Srgb`] with a black background. Trails
//! come from [`RasterSurface::fade`], which dims everything already drawn
//! the way a translucent black rectangle would.

use chaos_cycle_core::color::Srgb;
use chaos_cycle_core::error::SimError;

/// A `width × height` grid of sRGB pixels.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl RasterSurface {
    /// Creates a black surface.
    ///
    /// Returns `SimError::InvalidBounds` if either dimension is zero or the
    /// pixel count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        let invalid = || SimError::InvalidBounds {
            width: width as f64,
            height: height as f64,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let len = width.checked_mul(height).ok_or_else(invalid)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Srgb::BLACK; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn get(&self, x: usize, y: usize) -> Option<Srgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Srgb::BLACK);
    }

    /// Blends black over every pixel with opacity `amount`, clamped to [0, 1].
    pub fn fade(&mut self, amount: f64) {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        if keep == 1.0 {
            return;
        }
        for px in &mut self.pixels {
            px.r *= keep;
            px.g *= keep;
            px.b *= keep;
        }
    }

    /// Paints every pixel whose center lies within `radius` of `(x, y)`.
    ///
    /// The pixel containing `(x, y)` is always painted, so sub-pixel radii
    /// still leave a mark. Parts outside the surface are clipped.
    pub fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Srgb) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let radius = radius.max(0.0);
        let r2 = radius * radius;
        let x0 = clip(x - radius, self.width);
        let x1 = clip(x + radius + 1.0, self.width);
        let y0 = clip(y - radius, self.height);
        let y1 = clip(y + radius + 1.0, self.height);
        for py in y0..y1 {
            let dy = py as f64 + 0.5 - y;
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[py * self.width + px] = color;
                }
            }
        }
        if x >= 0.0 && y >= 0.0 {
            let (cx, cy) = (x as usize, y as usize);
            if cx < self.width && cy < self.height {
                self.pixels[cy * self.width + cx] = color;
            }
        }
    }
}

/// Floors `v` into `0..=extent`.
fn clip(v: f64, extent: usize) -> usize {
    if v <= 0.0 {
        0
    } else {
        (v.floor() as usize).min(extent)
    }
}
