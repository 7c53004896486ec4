//! Named force modules and complete simulation presets.
//!
//! [`ModuleKind`] maps module names to default-configured modules, and
//! [`Preset`] bundles a [`SimConfig`] with a matching module roster. Both
//! are the string-facing entry points used by the CLI.

use crate::color::Srgb;
use crate::config::{Damping, SimConfig, StepMode};
use crate::error::SimError;
use crate::field::ForceField;
use crate::force::{
    Breathing, CenterPath, ForceModule, IndexJitter, MultiAttractor, Oscillator, OrbitingCenters,
    PerlinDrift, Swirl, TravelingWave, TrigNoise, Vortex, DEFAULT_ATTRACTOR_COUNT,
};
use crate::prng::RandomSource;
use crate::style::{ColorMode, ParticleStyle};
use glam::DVec2;

const MODULE_NAMES: &[&str] = &[
    "vortex",
    "breathing",
    "wave",
    "swirl",
    "noise",
    "jitter",
    "perlin",
    "attractors",
    "orbiters",
];

const PRESET_NAMES: &[&str] = &["chaos-cycle", "alien-chaos"];

const PERLIN_SCALE: f64 = 0.01;
const PERLIN_TIME_SCALE: f64 = 0.2;
const PERLIN_STRENGTH: f64 = 40.0;
const PERLIN_FREQUENCY: f64 = 0.5;

/// Every force module that can be built by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Vortex,
    Breathing,
    Wave,
    Swirl,
    Noise,
    Jitter,
    Perlin,
    Attractors,
    Orbiters,
}

impl ModuleKind {
    /// Returns `SimError::UnknownModule` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "vortex" => Ok(ModuleKind::Vortex),
            "breathing" => Ok(ModuleKind::Breathing),
            "wave" => Ok(ModuleKind::Wave),
            "swirl" => Ok(ModuleKind::Swirl),
            "noise" => Ok(ModuleKind::Noise),
            "jitter" => Ok(ModuleKind::Jitter),
            "perlin" => Ok(ModuleKind::Perlin),
            "attractors" => Ok(ModuleKind::Attractors),
            "orbiters" => Ok(ModuleKind::Orbiters),
            _ => Err(SimError::UnknownModule(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        MODULE_NAMES
    }

    /// Builds the module with its default constants.
    ///
    /// Randomized modules draw their layout or seed from `rng`.
    pub fn build(self, rng: &mut impl RandomSource) -> Box<dyn ForceModule> {
        match self {
            ModuleKind::Vortex => Box::new(Vortex::default()),
            ModuleKind::Breathing => Box::new(Breathing::default()),
            ModuleKind::Wave => Box::new(TravelingWave::default()),
            ModuleKind::Swirl => Box::new(Swirl::default()),
            ModuleKind::Noise => Box::new(TrigNoise::default()),
            ModuleKind::Jitter => Box::new(IndexJitter::default()),
            ModuleKind::Perlin => Box::new(PerlinDrift::new(
                rng.next_seed() as u32,
                PERLIN_SCALE,
                PERLIN_TIME_SCALE,
                Oscillator::new(PERLIN_STRENGTH, PERLIN_FREQUENCY),
            )),
            ModuleKind::Attractors => Box::new(respawning_attractors(rng)),
            ModuleKind::Orbiters => Box::new(OrbitingCenters::default()),
        }
    }
}

fn respawning_attractors(rng: &mut impl RandomSource) -> MultiAttractor {
    MultiAttractor::new(DEFAULT_ATTRACTOR_COUNT, rng).with_respawn(true)
}

/// A complete simulation setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Vortex, breathing, traveling wave, trig noise and five respawning
    /// attractors, tinted by a cycling HSL hue.
    ChaosCycle,
    /// Swirl field, three orbiting centers, index jitter and a slow
    /// breathing pulse under oscillating damping, drawn in white.
    AlienChaos,
}

impl Preset {
    /// Returns `SimError::UnknownPreset` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "chaos-cycle" => Ok(Preset::ChaosCycle),
            "alien-chaos" => Ok(Preset::AlienChaos),
            _ => Err(SimError::UnknownPreset(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::ChaosCycle => "chaos-cycle",
            Preset::AlienChaos => "alien-chaos",
        }
    }

    pub fn config(self) -> SimConfig {
        match self {
            Preset::ChaosCycle => SimConfig {
                particle_count: 1200,
                max_speed: 16.0,
                damping: Damping::constant(0.99),
                step: StepMode::Elapsed,
                style: ParticleStyle::new(1.4, ColorMode::hsl()),
                trail_fade: 0.12,
            },
            Preset::AlienChaos => SimConfig {
                particle_count: 2000,
                max_speed: 6.0,
                damping: Damping::oscillating(0.96, 0.02, 1.32),
                step: StepMode::FixedGain(0.05),
                style: ParticleStyle::new(1.5, ColorMode::solid(Srgb::WHITE)),
                trail_fade: 0.15,
            },
        }
    }

    pub fn modules(self, rng: &mut impl RandomSource) -> ForceField {
        match self {
            Preset::ChaosCycle => [
                ModuleKind::Vortex,
                ModuleKind::Breathing,
                ModuleKind::Wave,
                ModuleKind::Noise,
                ModuleKind::Attractors,
            ]
            .into_iter()
            .fold(ForceField::new(), |field, kind| field.with(kind.build(rng))),
            Preset::AlienChaos => ForceField::new()
                .with(ModuleKind::Swirl.build(rng))
                .with(ModuleKind::Orbiters.build(rng))
                .with(ModuleKind::Jitter.build(rng))
                .with(Box::new(Breathing::new(
                    CenterPath::fixed(DVec2::splat(0.5)),
                    Oscillator::new(1.5, 0.12),
                    1e-4,
                ))),
        }
    }

    /// Config and module roster together.
    pub fn build(self, rng: &mut impl RandomSource) -> (SimConfig, ForceField) {
        (self.config(), self.modules(rng))
    }
}
