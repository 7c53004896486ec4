//! A deterministic, windowless [`Host`] backed by a [`RasterSurface`].
//!
//! Time comes from a [`FixedStepClock`] that advances once per frame, so two
//! runs with the same seed and frame count produce identical pixels.

use chaos_cycle_core::error::SimError;
use chaos_cycle_core::host::{Clock, DrawRequest, FixedStepClock, Host, ListenerId};
use chaos_cycle_core::simulation::SimulationLoop;

use crate::canvas::RasterSurface;

/// Offscreen host that records frames into memory.
pub struct HeadlessHost {
    surface: RasterSurface,
    clock: FixedStepClock,
    pending: bool,
    listeners: Vec<ListenerId>,
    next_listener: u64,
    draws: u64,
}

impl HeadlessHost {
    /// A black `width × height` surface with a 60 Hz clock.
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        Ok(Self::with_clock(
            RasterSurface::new(width, height)?,
            FixedStepClock::sixty_hz(),
        ))
    }

    pub fn with_clock(surface: RasterSurface, clock: FixedStepClock) -> Self {
        Self {
            surface,
            clock,
            pending: false,
            listeners: Vec::new(),
            next_listener: 0,
            draws: 0,
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn clock(&self) -> &FixedStepClock {
        &self.clock
    }

    /// Whether the simulation asked for another frame.
    pub fn has_pending_tick(&self) -> bool {
        self.pending
    }

    /// Total draw requests received.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Simulates a window resize: the surface is reallocated and cleared.
    ///
    /// The simulation picks up the new bounds on its next tick.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SimError> {
        self.surface = RasterSurface::new(width, height)?;
        log::debug!(
            "surface resized to {width}x{height} ({} listeners)",
            self.listeners.len()
        );
        Ok(())
    }

    fn take_pending(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

impl Host for HeadlessHost {
    fn bounds(&self) -> (f64, f64) {
        (self.surface.width() as f64, self.surface.height() as f64)
    }

    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn request_next_tick(&mut self) {
        self.pending = true;
    }

    fn begin_frame(&mut self, trail_fade: f64) {
        self.surface.fade(trail_fade);
    }

    fn draw(&mut self, request: DrawRequest) {
        self.surface
            .fill_disc(request.x, request.y, request.radius, request.color);
        self.draws += 1;
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}

/// Plays frames while the simulation keeps requesting them, up to
/// `max_frames`. Returns the number of frames run.
///
/// The clock advances one step before each frame.
pub fn run(sim: &mut SimulationLoop, host: &mut HeadlessHost, max_frames: usize) -> usize {
    let mut frames = 0;
    while frames < max_frames && host.take_pending() {
        host.clock.advance();
        if !sim.tick(host) {
            break;
        }
        frames += 1;
    }
    log::info!(
        "ran {frames} frames ({:.2}s simulated, {} draws)",
        sim.elapsed(),
        host.draw_count()
    );
    frames
}
