//! Incoherent-but-smooth fields: trigonometric pseudo-noise, per-particle
//! jitter, and Perlin drift.

use super::{ForceModule, Oscillator};
use crate::bounds::Bounds;
use crate::particle::Particle;
use glam::DVec2;
use noise::{NoiseFn, Perlin};

/// Cheap curl-like noise built from three sinusoids of position.
///
/// `n1 = sin(k(x + ωx·t))`, `n2 = cos(k(y − ωy·t))`, `n3 = sin(k2(x + y + ω3·t))`;
/// the acceleration is `((n1 − n3)·s(t), (n2 − n3)·s(t))`.
#[derive(Debug, Clone)]
pub struct TrigNoise {
    pub strength: Oscillator,
    pub wavenumber: f64,
    pub diagonal_wavenumber: f64,
    pub drift: DVec2,
    pub diagonal_drift: f64,
}

impl Default for TrigNoise {
    fn default() -> Self {
        Self {
            strength: Oscillator::new(60.0, 0.65),
            wavenumber: 0.07,
            diagonal_wavenumber: 0.04,
            drift: DVec2::new(0.9, 0.8),
            diagonal_drift: 0.6,
        }
    }
}

impl ForceModule for TrigNoise {
    fn name(&self) -> &str {
        "noise"
    }

    fn acceleration(&self, particle: &Particle, time: f64, _bounds: Bounds) -> DVec2 {
        let p = particle.position;
        let n1 = ((p.x + time * self.drift.x) * self.wavenumber).sin();
        let n2 = ((p.y - time * self.drift.y) * self.wavenumber).cos();
        let n3 = ((p.x + p.y + time * self.diagonal_drift) * self.diagonal_wavenumber).sin();
        DVec2::new(n1 - n3, n2 - n3) * self.strength.value(time)
    }
}

/// Per-particle wobble keyed on the particle index rather than its position.
///
/// Neighbouring particles get unrelated headings, which breaks up structures
/// that the spatial fields would otherwise lock in.
#[derive(Debug, Clone)]
pub struct IndexJitter {
    pub strength: f64,
    pub frequency: DVec2,
}

/// Index multipliers; large and incommensurate so consecutive indices decorrelate.
const JITTER_HASH: DVec2 = DVec2::new(12.9898, 78.233);

impl Default for IndexJitter {
    fn default() -> Self {
        Self {
            strength: 0.5,
            frequency: DVec2::new(0.24, 0.54),
        }
    }
}

impl ForceModule for IndexJitter {
    fn name(&self) -> &str {
        "jitter"
    }

    fn acceleration(&self, particle: &Particle, time: f64, _bounds: Bounds) -> DVec2 {
        let i = particle.index as f64;
        DVec2::new(
            (i * JITTER_HASH.x + time * self.frequency.x).sin(),
            (i * JITTER_HASH.y + time * self.frequency.y).cos(),
        ) * self.strength
    }
}

/// Perlin noise vector field that slowly evolves through time.
///
/// Two offset samples of 3D Perlin noise give the x and y components; an
/// oscillator fades the whole field in and out.
pub struct PerlinDrift {
    noise: Perlin,
    pub scale: f64,
    pub time_scale: f64,
    pub strength: Oscillator,
}

impl PerlinDrift {
    pub fn new(seed: u32, scale: f64, time_scale: f64, strength: Oscillator) -> Self {
        Self {
            noise: Perlin::new(seed),
            scale,
            time_scale,
            strength,
        }
    }
}

impl ForceModule for PerlinDrift {
    fn name(&self) -> &str {
        "perlin"
    }

    fn acceleration(&self, particle: &Particle, time: f64, _bounds: Bounds) -> DVec2 {
        let s = particle.position * self.scale;
        let z = time * self.time_scale;
        let dx = self.noise.get([s.x, s.y, z]);
        let dy = self.noise.get([s.x + 100.0, s.y + 100.0, z]);
        DVec2::new(dx, dy) * self.strength.value(time)
    }
}
