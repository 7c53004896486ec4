//! The host environment a simulation runs inside.
//!
//! The host owns the drawable surface, the frame scheduler, and the clock.
//! The core never draws or sleeps by itself: it asks the host for bounds and
//! time, hands it one [`DrawRequest`] per particle, and asks for the next tick.

use crate::color::Srgb;
use crate::error::SimError;
use std::time::Instant;

/// One particle to paint this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Srgb,
}

/// Handle for a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Capabilities the simulation consumes from its environment.
pub trait Host {
    /// Current drawable size as `(width, height)`.
    fn bounds(&self) -> (f64, f64);

    /// Monotonic time in seconds.
    fn now(&self) -> f64;

    /// Schedules one more tick as soon as the host is ready for a frame.
    fn request_next_tick(&mut self);

    /// Called once per tick before any draw. `trail_fade` is the opacity of
    /// the black wash that dims previous frames.
    fn begin_frame(&mut self, _trail_fade: f64) {}

    fn draw(&mut self, request: DrawRequest);

    /// Starts delivering resize events; the simulation reads fresh bounds
    /// every tick, so the listener only needs to keep the surface in sync.
    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// A monotonic time source.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock seconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that moves forward by a fixed step each frame.
///
/// Reading the clock does not advance it; the host calls [`advance`](Self::advance)
/// once per frame, so every tick sees an exact multiple of `step`.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    frames: u64,
}

impl FixedStepClock {
    /// Returns `SimError::InvalidStep` unless `step` is positive and finite.
    pub fn new(step: f64) -> Result<Self, SimError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(SimError::InvalidStep(step));
        }
        Ok(Self { step, frames: 0 })
    }

    /// 60 frames per second.
    pub fn sixty_hz() -> Self {
        Self {
            step: 1.0 / 60.0,
            frames: 0,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn advance(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Clock for FixedStepClock {
    fn now(&self) -> f64 {
        self.frames as f64 * self.step
    }
}
