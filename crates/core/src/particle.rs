//! Point particle kinematic state.

use crate::bounds::Bounds;
use crate::prng::RandomSource;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point particle.
///
/// `index` is the particle's slot in the simulation and never changes, so
/// index-dependent force modules see a stable identity across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub index: usize,
}

impl Particle {
    pub fn new(index: usize, position: DVec2, velocity: DVec2) -> Self {
        Self {
            position,
            velocity,
            index,
        }
    }

    /// A particle with zero velocity.
    pub fn at_rest(index: usize, position: DVec2) -> Self {
        Self::new(index, position, DVec2::ZERO)
    }

    /// Seeds `count` particles uniformly inside `bounds` with each velocity
    /// component uniform in `[-1, 1)`.
    pub fn scatter(count: usize, bounds: Bounds, rng: &mut impl RandomSource) -> Vec<Particle> {
        (0..count)
            .map(|index| {
                let position = DVec2::new(
                    rng.range(0.0, bounds.width()),
                    rng.range(0.0, bounds.height()),
                );
                let velocity = DVec2::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0));
                Particle::new(index, position, velocity)
            })
            .collect()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}
