//! Point attractors whose strength oscillates between attraction and repulsion.

use super::{softened_pull, softened_pull_bound, CenterPath, ForceModule, Oscillator};
use crate::bounds::Bounds;
use crate::particle::Particle;
use crate::prng::{RandomSource, Xorshift64};
use glam::DVec2;
use std::f64::consts::TAU;

/// Attractors in a default `MultiAttractor`.
pub const DEFAULT_ATTRACTOR_COUNT: usize = 5;
const ATTRACTOR_STRENGTH: f64 = 550.0;
const ATTRACTOR_SOFTENING: f64 = 80.0;
const MIN_FREQUENCY: f64 = 0.3;
const MAX_FREQUENCY: f64 = 1.0;

const ORBITER_SOFTENING: f64 = 0.001;

/// A single attractor at a normalized position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub anchor: DVec2,
    pub frequency: f64,
    pub phase: f64,
}

impl Attractor {
    fn random(rng: &mut impl RandomSource) -> Self {
        Self {
            anchor: DVec2::new(rng.next_f64(), rng.next_f64()),
            frequency: rng.range(MIN_FREQUENCY, MAX_FREQUENCY),
            phase: rng.range(0.0, TAU),
        }
    }

    /// Number of completed oscillation cycles at `time`.
    fn cycle(&self, time: f64) -> i64 {
        ((self.frequency * time + self.phase) / TAU).floor() as i64
    }
}

/// A fixed-size set of randomly placed attractors.
///
/// Each attractor pulls with strength `S · sin(f·t + φ)` and a softened
/// inverse-distance falloff. With `respawn` enabled, an attractor jumps to a
/// fresh random spot each time its oscillation completes a cycle, i.e. just
/// as its strength passes back through zero.
pub struct MultiAttractor {
    attractors: Vec<Attractor>,
    pub strength: f64,
    pub softening: f64,
    respawn: bool,
    rng: Xorshift64,
    cycles: Vec<Option<i64>>,
}

impl MultiAttractor {
    pub fn new(count: usize, rng: &mut impl RandomSource) -> Self {
        let attractors = (0..count).map(|_| Attractor::random(rng)).collect();
        Self {
            attractors,
            strength: ATTRACTOR_STRENGTH,
            softening: ATTRACTOR_SOFTENING,
            respawn: false,
            rng: Xorshift64::new(rng.next_seed()),
            cycles: vec![None; count],
        }
    }

    /// Builds from explicit attractors, e.g. for reproducible layouts.
    pub fn from_attractors(attractors: Vec<Attractor>, strength: f64, softening: f64) -> Self {
        let count = attractors.len();
        Self {
            attractors,
            strength,
            softening,
            respawn: false,
            rng: Xorshift64::new(count as u64 + 1),
            cycles: vec![None; count],
        }
    }

    pub fn with_respawn(mut self, respawn: bool) -> Self {
        self.respawn = respawn;
        self
    }

    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    /// Re-randomizes every attractor's position, frequency, and phase.
    pub fn reseed(&mut self, rng: &mut impl RandomSource) {
        for attractor in &mut self.attractors {
            *attractor = Attractor::random(rng);
        }
        self.cycles.fill(None);
    }

    /// Largest acceleration this module can produce anywhere.
    pub fn bound(&self) -> f64 {
        self.attractors.len() as f64 * softened_pull_bound(self.strength, self.softening)
    }
}

impl Default for MultiAttractor {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRACTOR_COUNT, &mut Xorshift64::new(0))
    }
}

impl ForceModule for MultiAttractor {
    fn name(&self) -> &str {
        "attractors"
    }

    fn prepare(&mut self, time: f64, _bounds: Bounds) {
        if !self.respawn {
            return;
        }
        for (attractor, seen) in self.attractors.iter_mut().zip(self.cycles.iter_mut()) {
            let cycle = attractor.cycle(time);
            if seen.is_some_and(|c| c != cycle) {
                attractor.anchor = DVec2::new(self.rng.next_f64(), self.rng.next_f64());
                log::debug!("attractor respawned at {:?}", attractor.anchor);
            }
            *seen = Some(cycle);
        }
    }

    fn acceleration(&self, particle: &Particle, time: f64, bounds: Bounds) -> DVec2 {
        self.attractors.iter().fold(DVec2::ZERO, |acc, a| {
            let strength = self.strength * (a.frequency * time + a.phase).sin();
            let delta = bounds.scale(a.anchor) - particle.position;
            acc + softened_pull(delta, self.softening) * strength
        })
    }
}

/// A center moving on its own path with its own strength oscillator.
#[derive(Debug, Clone)]
pub struct Orbiter {
    pub path: CenterPath,
    pub strength: Oscillator,
}

/// Several moving centers, each alternating between attraction and repulsion.
///
/// Center positions depend only on time and bounds, so they are computed
/// once in `prepare` and reused for every particle in that tick.
pub struct OrbitingCenters {
    orbiters: Vec<Orbiter>,
    pub softening: f64,
    prepared: Option<(f64, Bounds)>,
    cache: Vec<(DVec2, f64)>,
}

impl OrbitingCenters {
    pub fn new(orbiters: Vec<Orbiter>, softening: f64) -> Self {
        Self {
            orbiters,
            softening,
            prepared: None,
            cache: Vec::new(),
        }
    }

    pub fn orbiters(&self) -> &[Orbiter] {
        &self.orbiters
    }

    fn centers(&self, time: f64, bounds: Bounds) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        self.orbiters
            .iter()
            .map(move |o| (o.path.position(time, bounds), o.strength.value(time)))
    }

    fn pull(&self, position: DVec2, centers: impl Iterator<Item = (DVec2, f64)>) -> DVec2 {
        centers.fold(DVec2::ZERO, |acc, (center, strength)| {
            acc + softened_pull(center - position, self.softening) * strength
        })
    }
}

impl Default for OrbitingCenters {
    fn default() -> Self {
        let orbiters = vec![
            Orbiter {
                path: CenterPath::sin_cos(
                    DVec2::new(0.25, 0.25),
                    DVec2::splat(0.2),
                    DVec2::new(0.42, 0.54),
                ),
                strength: Oscillator::new(2.0, 0.36),
            },
            Orbiter {
                path: CenterPath::cos_sin(
                    DVec2::new(0.75, 0.25),
                    DVec2::splat(0.2),
                    DVec2::new(0.3, 0.48),
                ),
                strength: Oscillator::new(2.0, 0.54),
            },
            Orbiter {
                path: CenterPath::cos_sin(
                    DVec2::new(0.5, 0.75),
                    DVec2::splat(0.25),
                    DVec2::new(0.24, 0.36),
                ),
                strength: Oscillator::new(2.0, 0.72),
            },
        ];
        Self::new(orbiters, ORBITER_SOFTENING)
    }
}

impl ForceModule for OrbitingCenters {
    fn name(&self) -> &str {
        "orbiters"
    }

    fn prepare(&mut self, time: f64, bounds: Bounds) {
        let cache: Vec<_> = self.centers(time, bounds).collect();
        self.cache = cache;
        self.prepared = Some((time, bounds));
    }

    fn acceleration(&self, particle: &Particle, time: f64, bounds: Bounds) -> DVec2 {
        if self.prepared == Some((time, bounds)) {
            self.pull(particle.position, self.cache.iter().copied())
        } else {
            self.pull(particle.position, self.centers(time, bounds))
        }
    }
}
