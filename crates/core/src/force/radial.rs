//! Center-based fields: a rotating vortex and a breathing radial pulse.

use super::{softened_pull, CenterPath, ForceModule, Oscillator};
use crate::bounds::Bounds;
use crate::particle::Particle;
use glam::DVec2;

const VORTEX_STRENGTH: f64 = 9000.0;
const VORTEX_STRENGTH_FREQUENCY: f64 = 0.7;
const VORTEX_EXCURSION: f64 = 0.35;
const VORTEX_SOFTENING: f64 = 1.0;

const BREATHING_PULSE: f64 = 240.0;
const BREATHING_FREQUENCY: f64 = 1.0;
const BREATHING_SOFTENING: f64 = 1.0;

/// Rotational field around a center that wanders on a Lissajous path.
///
/// Acceleration is perpendicular (counter-clockwise) to the offset from the
/// center with magnitude `|s(t)| · d / (d² + ε)`. The sign of the strength
/// oscillator flips the spin direction.
#[derive(Debug, Clone)]
pub struct Vortex {
    pub center: CenterPath,
    pub strength: Oscillator,
    pub softening: f64,
}

impl Vortex {
    pub fn new(center: CenterPath, strength: Oscillator, softening: f64) -> Self {
        Self {
            center,
            strength,
            softening,
        }
    }
}

impl Default for Vortex {
    fn default() -> Self {
        Self::new(
            CenterPath::sin_cos(
                DVec2::splat(0.5),
                DVec2::splat(VORTEX_EXCURSION),
                DVec2::new(0.3, 0.4),
            ),
            Oscillator::new(VORTEX_STRENGTH, VORTEX_STRENGTH_FREQUENCY),
            VORTEX_SOFTENING,
        )
    }
}

impl ForceModule for Vortex {
    fn name(&self) -> &str {
        "vortex"
    }

    fn acceleration(&self, particle: &Particle, time: f64, bounds: Bounds) -> DVec2 {
        let offset = particle.position - self.center.position(time, bounds);
        softened_pull(offset.perp(), self.softening) * self.strength.value(time)
    }
}

/// Radial pulse that alternates between implosion and explosion.
///
/// A positive pulse pulls toward the center, a negative one pushes away.
/// The direction is normalized with a softened length, so the magnitude is
/// at most `|pulse(t)|` and vanishes at the center itself.
#[derive(Debug, Clone)]
pub struct Breathing {
    pub center: CenterPath,
    pub pulse: Oscillator,
    pub softening: f64,
}

impl Breathing {
    pub fn new(center: CenterPath, pulse: Oscillator, softening: f64) -> Self {
        Self {
            center,
            pulse,
            softening,
        }
    }
}

impl Default for Breathing {
    fn default() -> Self {
        Self::new(
            CenterPath::fixed(DVec2::splat(0.5)),
            Oscillator::new(BREATHING_PULSE, BREATHING_FREQUENCY),
            BREATHING_SOFTENING,
        )
    }
}

impl ForceModule for Breathing {
    fn name(&self) -> &str {
        "breathing"
    }

    fn acceleration(&self, particle: &Particle, time: f64, bounds: Bounds) -> DVec2 {
        let toward = self.center.position(time, bounds) - particle.position;
        let reach = (toward.length_squared() + self.softening).sqrt();
        toward / reach * self.pulse.value(time)
    }
}
