#![deny(unsafe_code)]
//! Offscreen rendering host for chaos-cycle.
//!
//! Implements the core `Host` trait on an in-memory RGB surface with a
//! fixed-step clock, so simulations can run headless and deterministically
//! (CLI rendering, tests). PNG output sits behind the default `png` feature.

pub mod canvas;
pub mod headless;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use canvas::RasterSurface;
pub use headless::{run, HeadlessHost};
pub use pixel::surface_to_rgba;
