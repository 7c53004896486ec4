//! Center-free fields driven by sinusoids of position and time.

use super::ForceModule;
use crate::bounds::Bounds;
use crate::particle::Particle;
use glam::DVec2;

/// Criss-crossing travelling wavefronts.
///
/// A diagonal carrier `g = A · sin(ωt + k(x + y))` modulates two
/// transverse components, `cos(k'(y + vt))` on x and `sin(k'(x + vt))` on y.
#[derive(Debug, Clone)]
pub struct TravelingWave {
    pub amplitude: f64,
    pub temporal_frequency: f64,
    pub carrier_wavenumber: f64,
    pub cross_wavenumber: f64,
    pub drift: f64,
}

impl Default for TravelingWave {
    fn default() -> Self {
        Self {
            amplitude: 70.0,
            temporal_frequency: 0.5,
            carrier_wavenumber: 0.015,
            cross_wavenumber: 0.06,
            drift: 0.2,
        }
    }
}

impl ForceModule for TravelingWave {
    fn name(&self) -> &str {
        "wave"
    }

    fn acceleration(&self, particle: &Particle, time: f64, _bounds: Bounds) -> DVec2 {
        let p = particle.position;
        let g = self.amplitude
            * (self.temporal_frequency * time + (p.x + p.y) * self.carrier_wavenumber).sin();
        let shift = time * self.drift;
        DVec2::new(
            ((p.y + shift) * self.cross_wavenumber).cos(),
            ((p.x + shift) * self.cross_wavenumber).sin(),
        ) * g
    }
}

/// Rotating angle field.
///
/// Each point is assigned a heading `θ = sin(k·y + ωa·t) · cos(k·x − ωb·t)`
/// and accelerated along it with constant strength.
#[derive(Debug, Clone)]
pub struct Swirl {
    pub strength: f64,
    pub wavenumber: f64,
    pub frequency_a: f64,
    pub frequency_b: f64,
}

impl Default for Swirl {
    fn default() -> Self {
        Self {
            strength: 0.3,
            wavenumber: 0.01,
            frequency_a: 0.78,
            frequency_b: 0.42,
        }
    }
}

impl Swirl {
    /// Heading in radians at `position` and `time`.
    pub fn heading(&self, position: DVec2, time: f64) -> f64 {
        (position.y * self.wavenumber + time * self.frequency_a).sin()
            * (position.x * self.wavenumber - time * self.frequency_b).cos()
    }
}

impl ForceModule for Swirl {
    fn name(&self) -> &str {
        "swirl"
    }

    fn acceleration(&self, particle: &Particle, time: f64, _bounds: Bounds) -> DVec2 {
        DVec2::from_angle(self.heading(particle.position, time)) * self.strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(400.0, 300.0).unwrap()
    }

    #[test]
    fn wave_is_bounded_by_amplitude_per_axis() {
        let wave = TravelingWave::default();
        for i in 0..500 {
            let p = Particle::at_rest(i, DVec2::new(i as f64 * 0.8, i as f64 * 0.6));
            let a = wave.acceleration(&p, i as f64 * 0.05, bounds());
            assert!(a.x.abs() <= wave.amplitude + 1e-9);
            assert!(a.y.abs() <= wave.amplitude + 1e-9);
        }
    }

    #[test]
    fn wave_ignores_bounds() {
        let wave = TravelingWave::default();
        let p = Particle::at_rest(0, DVec2::new(33.0, 71.0));
        let small = wave.acceleration(&p, 4.2, Bounds::new(100.0, 100.0).unwrap());
        let large = wave.acceleration(&p, 4.2, Bounds::new(900.0, 700.0).unwrap());
        assert_eq!(small, large);
    }

    #[test]
    fn wave_changes_over_time() {
        let wave = TravelingWave::default();
        let p = Particle::at_rest(0, DVec2::new(120.0, 40.0));
        let a0 = wave.acceleration(&p, 0.0, bounds());
        let a1 = wave.acceleration(&p, 2.0, bounds());
        assert_ne!(a0, a1);
    }

    #[test]
    fn swirl_has_constant_magnitude() {
        let swirl = Swirl::default();
        for i in 0..200 {
            let p = Particle::at_rest(i, DVec2::new(i as f64 * 3.1, i as f64 * 1.7));
            let a = swirl.acceleration(&p, i as f64 * 0.1, bounds());
            assert!((a.length() - swirl.strength).abs() < 1e-12);
        }
    }

    #[test]
    fn swirl_heading_at_origin_and_time_zero_is_zero() {
        let swirl = Swirl::default();
        assert_eq!(swirl.heading(DVec2::ZERO, 0.0), 0.0);
        let a = swirl.acceleration(&Particle::at_rest(0, DVec2::ZERO), 0.0, bounds());
        assert!((a - DVec2::new(swirl.strength, 0.0)).length() < 1e-12);
    }
}
