//! Error types for the chaos-cycle core.
//!
//! Only construction-time misconfiguration is an error. Once a simulation is
//! running, every physics operation is total.

use crate::simulation::SimState;
use thiserror::Error;

/// Errors produced while configuring or driving a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Width or height was zero, negative, or not finite.
    #[error("invalid bounds ({width}, {height}): width and height must be positive and finite")]
    InvalidBounds { width: f64, height: f64 },

    /// The configured particle count was zero.
    #[error("invalid particle count: at least one particle is required")]
    InvalidParticleCount,

    /// The speed limit was zero, negative, or not finite.
    #[error("invalid max speed {0}: must be positive and finite")]
    InvalidMaxSpeed(f64),

    /// The damping oscillation leaves the (0, 1] range.
    #[error("invalid damping base {base} with amplitude {amplitude}: factor must stay within (0, 1]")]
    InvalidDamping { base: f64, amplitude: f64 },

    /// A fixed integration gain or clock step was zero, negative, or not finite.
    #[error("invalid step {0}: must be positive and finite")]
    InvalidStep(f64),

    /// The trail fade alpha was outside [0, 1] or not finite.
    #[error("invalid trail fade {0}: must be within [0, 1]")]
    InvalidTrailFade(f64),

    /// The particle radius was negative or not finite.
    #[error("invalid particle radius {0}: must be non-negative and finite")]
    InvalidRadius(f64),

    /// A lifecycle operation was requested in the wrong state.
    #[error("invalid simulation state: expected {expected}, got {actual}")]
    InvalidState { expected: SimState, actual: SimState },

    /// A force module name was not recognized.
    #[error("unknown force module: {0}")]
    UnknownModule(String),

    /// A preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A color mode name was not recognized.
    #[error("unknown color mode: {0}")]
    UnknownColorMode(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing an output artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}
