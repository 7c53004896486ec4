//! The force field: an ordered roster of force modules whose outputs are summed.

use crate::bounds::Bounds;
use crate::force::ForceModule;
use crate::particle::Particle;
use glam::DVec2;

struct Slot {
    module: Box<dyn ForceModule>,
    enabled: bool,
}

/// Ordered collection of [`ForceModule`]s.
///
/// The total acceleration on a particle is the vector sum of every enabled
/// module's output. Order never changes the physics but is kept stable so a
/// given roster always evaluates the same way.
#[derive(Default)]
pub struct ForceField {
    slots: Vec<Slot>,
}

impl ForceField {
    /// Creates an empty field. Evaluating it yields zero acceleration.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Appends a module (builder pattern).
    pub fn with(mut self, module: Box<dyn ForceModule>) -> Self {
        self.push(module);
        self
    }

    pub fn push(&mut self, module: Box<dyn ForceModule>) {
        self.slots.push(Slot {
            module,
            enabled: true,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Module names in roster order.
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.module.name()).collect()
    }

    /// Names of the modules currently contributing.
    pub fn enabled_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.module.name())
            .collect()
    }

    /// Enables or disables every module called `name`.
    ///
    /// Returns `false` if no module has that name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut matched = false;
        for slot in self.slots.iter_mut().filter(|s| s.module.name() == name) {
            slot.enabled = enabled;
            matched = true;
        }
        matched
    }

    /// Lets every enabled module update its private state for this tick.
    pub fn prepare(&mut self, time: f64, bounds: Bounds) {
        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            slot.module.prepare(time, bounds);
        }
    }

    /// Summed acceleration on `particle`.
    pub fn evaluate(&self, particle: &Particle, time: f64, bounds: Bounds) -> DVec2 {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .fold(DVec2::ZERO, |acc, s| {
                acc + s.module.acceleration(particle, time, bounds)
            })
    }
}
