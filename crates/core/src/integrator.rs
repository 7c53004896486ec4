//! Per-particle time stepping: accelerate, clamp, damp, move, wrap.

use crate::bounds::Bounds;
use crate::config::{Damping, SimConfig, StepMode};
use crate::particle::Particle;
use glam::DVec2;

/// Rescales `velocity` to `max_speed` if it is faster, keeping its direction.
pub fn clamp_speed(velocity: DVec2, max_speed: f64) -> DVec2 {
    let speed = velocity.length();
    if speed > max_speed {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Advances particles one tick.
///
/// The clamp runs before damping, so a particle's speed never exceeds
/// `max_speed` after a step regardless of how strong the field is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    max_speed: f64,
    damping: Damping,
    step: StepMode,
}

impl Integrator {
    /// Expects a config that already passed [`SimConfig::validate`].
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            damping: config.damping,
            step: config.step,
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn damping_factor(&self, time: f64) -> f64 {
        self.damping.factor(time)
    }

    fn gain(&self, dt: f64) -> f64 {
        match self.step {
            StepMode::Elapsed => dt,
            StepMode::FixedGain(gain) => gain,
        }
    }

    /// Integrates `particle` under `acceleration`.
    ///
    /// `dt` is the elapsed time since the previous tick and is ignored in
    /// fixed-gain mode. Velocity is measured in surface units per tick.
    pub fn step(
        &self,
        particle: &mut Particle,
        acceleration: DVec2,
        dt: f64,
        time: f64,
        bounds: Bounds,
    ) {
        let velocity = particle.velocity + acceleration * self.gain(dt);
        let velocity = clamp_speed(velocity, self.max_speed) * self.damping_factor(time);
        particle.velocity = velocity;
        particle.position = bounds.wrap(particle.position + velocity);
    }
}
