//! Drawable surface extent and toroidal wrapping.

use crate::error::SimError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Width and height of the drawable surface.
///
/// Only constructible with positive, finite extents, so every physics
/// routine that receives a `Bounds` can divide by or wrap against it freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Returns `SimError::InvalidBounds` unless both extents are positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, SimError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Extent as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        self.size() * 0.5
    }

    /// Maps a normalized `(0..1, 0..1)` coordinate onto the surface.
    pub fn scale(&self, normalized: DVec2) -> DVec2 {
        normalized * self.size()
    }

    /// Whether `p` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    /// Toroidal wrap into `[0, width) × [0, height)`.
    pub fn wrap(&self, p: DVec2) -> DVec2 {
        DVec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }
}

/// Wraps one coordinate into `[0, extent)`.
///
/// Handles positions more than one extent outside (possible after a
/// shrinking resize). `rem_euclid` can round a tiny negative value up to
/// exactly `extent`, which is folded back to 0.
fn wrap_axis(value: f64, extent: f64) -> f64 {
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
