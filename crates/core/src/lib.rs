#![deny(unsafe_code)]
//! Core physics for the chaos-cycle particle system.
//!
//! Provides `Particle` and `Bounds`, the `ForceModule` trait with its module
//! families, the summing `ForceField`, the `Integrator`, and the host-driven
//! `SimulationLoop`, plus color mapping, configuration, presets, and the
//! `Xorshift64` PRNG. Drawing and frame scheduling belong to a [`Host`].

pub mod bounds;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod force;
pub mod host;
pub mod integrator;
pub mod particle;
pub mod presets;
pub mod prng;
pub mod simulation;
pub mod style;

pub use bounds::Bounds;
pub use color::{Hsl, LinearRgb, OkLab, OkLch, Srgb};
pub use config::{Damping, SimConfig, StepMode};
pub use error::SimError;
pub use field::ForceField;
pub use force::ForceModule;
pub use host::{Clock, DrawRequest, FixedStepClock, Host, ListenerId, SystemClock};
pub use integrator::Integrator;
pub use particle::Particle;
pub use presets::{ModuleKind, Preset};
pub use prng::{RandomSource, Xorshift64};
pub use simulation::{SimState, SimulationLoop};
pub use style::{ColorMode, ParticleStyle};
