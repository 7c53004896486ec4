//! The frame-driven simulation loop.
//!
//! A [`SimulationLoop`] owns the particles and the force field. The host
//! calls [`SimulationLoop::tick`] once per frame after the loop asked for it
//! through [`Host::request_next_tick`]; a tick always runs to completion.

use crate::bounds::Bounds;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::field::ForceField;
use crate::host::{Host, ListenerId};
use crate::integrator::Integrator;
use crate::particle::Particle;
use crate::prng::RandomSource;
use std::fmt;

/// Lifecycle of a [`SimulationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Uninitialized,
    Running,
    Stopped,
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimState::Uninitialized => "uninitialized",
            SimState::Running => "running",
            SimState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Particle system driven by host frames.
///
/// Bounds are read from the host at the start of every tick, never cached
/// across ticks, so a resize between frames takes effect immediately.
pub struct SimulationLoop {
    config: SimConfig,
    integrator: Integrator,
    field: ForceField,
    particles: Vec<Particle>,
    state: SimState,
    listener: Option<ListenerId>,
    start_time: f64,
    elapsed: f64,
    ticks: u64,
    last_bounds: Option<Bounds>,
}

impl SimulationLoop {
    /// Validates `config`; no particle exists until [`start`](Self::start).
    pub fn new(config: SimConfig, field: ForceField) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            integrator: Integrator::from_config(&config),
            config,
            field,
            particles: Vec::new(),
            state: SimState::Uninitialized,
            listener: None,
            start_time: 0.0,
            elapsed: 0.0,
            ticks: 0,
            last_bounds: None,
        })
    }

    /// Scatters `particle_count` particles over the host surface and
    /// requests the first tick.
    ///
    /// Fails with `InvalidBounds` if the host reports a degenerate surface,
    /// or `InvalidState` if the loop was already started or stopped.
    pub fn start(&mut self, host: &mut dyn Host, rng: &mut impl RandomSource) -> Result<(), SimError> {
        self.expect_state(SimState::Uninitialized)?;
        let bounds = host_bounds(host)?;
        let particles = Particle::scatter(self.config.particle_count, bounds, rng);
        self.launch(host, bounds, particles);
        Ok(())
    }

    /// Like [`start`](Self::start) with caller-supplied particles.
    ///
    /// Positions outside the surface are wrapped into it.
    pub fn start_with(&mut self, host: &mut dyn Host, particles: Vec<Particle>) -> Result<(), SimError> {
        self.expect_state(SimState::Uninitialized)?;
        if particles.is_empty() {
            return Err(SimError::InvalidParticleCount);
        }
        let bounds = host_bounds(host)?;
        let particles = particles
            .into_iter()
            .map(|mut p| {
                p.position = bounds.wrap(p.position);
                p
            })
            .collect();
        self.launch(host, bounds, particles);
        Ok(())
    }

    fn launch(&mut self, host: &mut dyn Host, bounds: Bounds, particles: Vec<Particle>) {
        self.particles = particles;
        self.listener = Some(host.add_resize_listener());
        self.start_time = host.now();
        self.elapsed = 0.0;
        self.last_bounds = Some(bounds);
        self.state = SimState::Running;
        log::debug!(
            "simulation started: {} particles on {}x{}, modules [{}]",
            self.particles.len(),
            bounds.width(),
            bounds.height(),
            self.field.enabled_names().join(", ")
        );
        host.request_next_tick();
    }

    fn expect_state(&self, expected: SimState) -> Result<(), SimError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SimError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Runs one frame: evaluate, integrate, and draw every particle, then
    /// request the next tick.
    ///
    /// Returns `false` without touching the host unless the loop is running.
    /// A degenerate surface skips the physics for this frame but keeps the
    /// loop alive.
    pub fn tick(&mut self, host: &mut dyn Host) -> bool {
        if self.state != SimState::Running {
            return false;
        }
        let time = (host.now() - self.start_time).max(0.0);
        let dt = (time - self.elapsed).max(0.0);
        self.elapsed = time;
        self.ticks += 1;

        let (width, height) = host.bounds();
        match Bounds::new(width, height) {
            Ok(bounds) => {
                if self.last_bounds != Some(bounds) {
                    log::debug!("bounds changed to {width}x{height} at tick {}", self.ticks);
                    self.last_bounds = Some(bounds);
                }
                self.advance(host, time, dt, bounds);
            }
            Err(_) => {
                log::warn!(
                    "skipping tick {}: degenerate bounds {width}x{height}",
                    self.ticks
                );
            }
        }
        host.request_next_tick();
        true
    }

    fn advance(&mut self, host: &mut dyn Host, time: f64, dt: f64, bounds: Bounds) {
        self.field.prepare(time, bounds);
        host.begin_frame(self.config.trail_fade);
        for particle in self.particles.iter_mut() {
            let acceleration = self.field.evaluate(particle, time, bounds);
            self.integrator.step(particle, acceleration, dt, time, bounds);
            host.draw(self.config.style.draw_request(particle, time));
        }
    }

    /// Deregisters the resize listener and stops scheduling ticks.
    ///
    /// Idempotent; stopping a loop that never started is allowed.
    pub fn stop(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.listener.take() {
            host.remove_resize_listener(id);
        }
        if self.state != SimState::Stopped {
            log::debug!("simulation stopped after {} ticks", self.ticks);
            self.state = SimState::Stopped;
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn field(&self) -> &ForceField {
        &self.field
    }

    /// Mutable access for toggling modules while running.
    pub fn field_mut(&mut self) -> &mut ForceField {
        &mut self.field
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks executed since start, including skipped ones.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulation time of the latest tick, in seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

fn host_bounds(host: &dyn Host) -> Result<Bounds, SimError> {
    let (width, height) = host.bounds();
    Bounds::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Damping;
    use crate::force::{Breathing, ForceModule};
    use crate::host::DrawRequest;
    use crate::prng::Xorshift64;
    use glam::DVec2;

    #[derive(Default)]
    struct MockHost {
        size: (f64, f64),
        time: f64,
        pending: usize,
        frames_begun: usize,
        draws: Vec<DrawRequest>,
        listeners: Vec<ListenerId>,
        next_listener: u64,
    }

    impl MockHost {
        fn new(width: f64, height: f64) -> Self {
            Self {
                size: (width, height),
                ..Self::default()
            }
        }
    }

    impl Host for MockHost {
        fn bounds(&self) -> (f64, f64) {
            self.size
        }

        fn now(&self) -> f64 {
            self.time
        }

        fn request_next_tick(&mut self) {
            self.pending += 1;
        }

        fn begin_frame(&mut self, _trail_fade: f64) {
            self.frames_begun += 1;
        }

        fn draw(&mut self, request: DrawRequest) {
            self.draws.push(request);
        }

        fn add_resize_listener(&mut self) -> ListenerId {
            self.next_listener += 1;
            let id = ListenerId(self.next_listener);
            self.listeners.push(id);
            id
        }

        fn remove_resize_listener(&mut self, id: ListenerId) {
            self.listeners.retain(|l| *l != id);
        }
    }

    struct Push(DVec2);

    impl ForceModule for Push {
        fn name(&self) -> &str {
            "push"
        }

        fn acceleration(&self, _particle: &Particle, _time: f64, _bounds: Bounds) -> DVec2 {
            self.0
        }
    }

    fn config(count: usize) -> SimConfig {
        SimConfig {
            particle_count: count,
            ..SimConfig::default()
        }
    }

    fn running(count: usize, field: ForceField, host: &mut MockHost) -> SimulationLoop {
        let mut sim = SimulationLoop::new(config(count), field).unwrap();
        sim.start(host, &mut Xorshift64::new(7)).unwrap();
        sim
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = SimulationLoop::new(config(0), ForceField::new());
        assert!(matches!(result, Err(SimError::InvalidParticleCount)));
    }

    #[test]
    fn starts_uninitialized_with_no_particles() {
        let sim = SimulationLoop::new(config(10), ForceField::new()).unwrap();
        assert_eq!(sim.state(), SimState::Uninitialized);
        assert!(sim.particles().is_empty());
    }

    #[test]
    fn start_seeds_particles_and_requests_tick() {
        let mut host = MockHost::new(320.0, 240.0);
        let sim = running(50, ForceField::new(), &mut host);
        assert_eq!(sim.state(), SimState::Running);
        assert_eq!(sim.particles().len(), 50);
        assert_eq!(host.pending, 1);
        assert_eq!(host.listeners.len(), 1);
        let b = Bounds::new(320.0, 240.0).unwrap();
        assert!(sim.particles().iter().all(|p| b.contains(p.position)));
    }

    #[test]
    fn start_fails_fast_on_degenerate_bounds() {
        for size in [(0.0, 100.0), (100.0, -1.0), (f64::NAN, 10.0)] {
            let mut host = MockHost::new(size.0, size.1);
            let mut sim = SimulationLoop::new(config(5), ForceField::new()).unwrap();
            let result = sim.start(&mut host, &mut Xorshift64::new(1));
            assert!(matches!(result, Err(SimError::InvalidBounds { .. })));
            assert!(sim.particles().is_empty());
            assert_eq!(sim.state(), SimState::Uninitialized);
            assert_eq!(host.pending, 0);
            assert!(host.listeners.is_empty());
        }
    }

    #[test]
    fn start_twice_is_invalid_state() {
        let mut host = MockHost::new(100.0, 100.0);
        let mut sim = running(3, ForceField::new(), &mut host);
        let err = sim.start(&mut host, &mut Xorshift64::new(2)).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidState {
                expected: SimState::Uninitialized,
                actual: SimState::Running,
            }
        ));
    }

    #[test]
    fn start_with_wraps_positions_and_rejects_empty() {
        let mut host = MockHost::new(100.0, 100.0);
        let mut sim = SimulationLoop::new(config(1), ForceField::new()).unwrap();
        assert!(matches!(
            sim.start_with(&mut host, Vec::new()),
            Err(SimError::InvalidParticleCount)
        ));
        sim.start_with(&mut host, vec![Particle::at_rest(0, DVec2::new(150.0, -20.0))])
            .unwrap();
        assert_eq!(sim.particles()[0].position, DVec2::new(50.0, 80.0));
    }

    #[test]
    fn tick_draws_every_particle_once() {
        let mut host = MockHost::new(200.0, 200.0);
        let mut sim = running(25, ForceField::new(), &mut host);
        host.time = 1.0 / 60.0;
        assert!(sim.tick(&mut host));
        assert_eq!(host.draws.len(), 25);
        assert_eq!(host.frames_begun, 1);
        assert_eq!(host.pending, 2);
        assert_eq!(sim.ticks(), 1);
        assert!((sim.elapsed() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn elapsed_time_is_relative_to_start() {
        let mut host = MockHost::new(100.0, 100.0);
        host.time = 50.0;
        let field = ForceField::new().with(Box::new(Push(DVec2::new(6.0, 0.0))));
        let mut sim = SimulationLoop::new(config(1), field).unwrap();
        sim.start_with(&mut host, vec![Particle::at_rest(0, DVec2::new(10.0, 10.0))])
            .unwrap();
        host.time = 50.5;
        sim.tick(&mut host);
        // a * dt = 6 * 0.5, then the constant 0.99 damping
        let v = sim.particles()[0].velocity;
        assert!((v.x - 3.0 * 0.99).abs() < 1e-12, "{v:?}");
        assert!((sim.elapsed() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_bounds_mid_run_skip_physics_but_keep_ticking() {
        let mut host = MockHost::new(100.0, 100.0);
        let mut sim = running(8, ForceField::new(), &mut host);
        let before = sim.particles().to_vec();
        host.size = (0.0, 0.0);
        host.time = 0.1;
        assert!(sim.tick(&mut host));
        assert!(host.draws.is_empty());
        assert_eq!(sim.particles(), before.as_slice());
        assert_eq!(host.pending, 2);
        assert_eq!(sim.state(), SimState::Running);
    }

    #[test]
    fn shrinking_resize_rewraps_particles() {
        let mut host = MockHost::new(400.0, 400.0);
        let mut sim = running(200, ForceField::new(), &mut host);
        host.size = (50.0, 30.0);
        host.time = 1.0 / 60.0;
        sim.tick(&mut host);
        let b = Bounds::new(50.0, 30.0).unwrap();
        assert!(sim.particles().iter().all(|p| b.contains(p.position)));
    }

    #[test]
    fn stop_releases_listener_and_halts_ticks() {
        let mut host = MockHost::new(100.0, 100.0);
        let mut sim = running(5, ForceField::new(), &mut host);
        sim.stop(&mut host);
        assert_eq!(sim.state(), SimState::Stopped);
        assert!(host.listeners.is_empty());
        let pending = host.pending;
        host.time = 1.0;
        assert!(!sim.tick(&mut host));
        assert!(host.draws.is_empty());
        assert_eq!(host.pending, pending);
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn stop_is_idempotent_and_allowed_before_start() {
        let mut host = MockHost::new(100.0, 100.0);
        let mut sim = SimulationLoop::new(config(5), ForceField::new()).unwrap();
        sim.stop(&mut host);
        sim.stop(&mut host);
        assert_eq!(sim.state(), SimState::Stopped);
        assert!(!sim.tick(&mut host));
        assert!(matches!(
            sim.start(&mut host, &mut Xorshift64::new(3)),
            Err(SimError::InvalidState { .. })
        ));
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut host = MockHost::new(100.0, 100.0);
        let mut sim = SimulationLoop::new(config(5), ForceField::new()).unwrap();
        assert!(!sim.tick(&mut host));
        assert_eq!(host.pending, 0);
    }

    #[test]
    fn disabled_module_can_be_toggled_while_running() {
        let mut host = MockHost::new(100.0, 100.0);
        let field = ForceField::new().with(Box::new(Push(DVec2::new(100.0, 0.0))));
        let mut sim = SimulationLoop::new(config(1), field).unwrap();
        sim.start_with(&mut host, vec![Particle::at_rest(0, DVec2::new(10.0, 10.0))])
            .unwrap();
        assert!(sim.field_mut().set_enabled("push", false));
        host.time = 0.1;
        sim.tick(&mut host);
        assert_eq!(sim.particles()[0].velocity, DVec2::ZERO);
    }

    #[test]
    fn breathing_moves_corner_particles_within_bounds() {
        let mut host = MockHost::new(100.0, 100.0);
        let config = SimConfig {
            particle_count: 4,
            max_speed: 6.0,
            damping: Damping::constant(0.98),
            ..SimConfig::default()
        };
        let field = ForceField::new().with(Box::new(Breathing::default()));
        let mut sim = SimulationLoop::new(config, field).unwrap();
        let corners = vec![
            Particle::at_rest(0, DVec2::new(0.0, 0.0)),
            Particle::at_rest(1, DVec2::new(99.0, 0.0)),
            Particle::at_rest(2, DVec2::new(0.0, 99.0)),
            Particle::at_rest(3, DVec2::new(99.0, 99.0)),
        ];
        sim.start_with(&mut host, corners.clone()).unwrap();
        for frame in 1..=100 {
            host.time = frame as f64 / 60.0;
            assert!(sim.tick(&mut host));
        }
        let b = Bounds::new(100.0, 100.0).unwrap();
        for (start, end) in corners.iter().zip(sim.particles()) {
            assert!(b.contains(end.position), "{:?} escaped", end.position);
            assert!(
                (end.position - start.position).length() > 1.0,
                "particle {} barely moved",
                start.index
            );
        }
        assert_eq!(host.draws.len(), 400);
    }

    mod proptests {
        use super::*;
        use crate::presets::Preset;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(16))]

            #[test]
            fn presets_respect_bounds_and_speed(
                seed: u64,
                alien: bool,
                width in 10.0_f64..400.0,
                height in 10.0_f64..400.0,
            ) {
                let preset = if alien { Preset::AlienChaos } else { Preset::ChaosCycle };
                let mut rng = Xorshift64::new(seed);
                let (mut config, field) = preset.build(&mut rng);
                config.particle_count = 40;
                let max_speed = config.max_speed;
                let mut sim = SimulationLoop::new(config, field).unwrap();
                let mut host = MockHost::new(width, height);
                sim.start(&mut host, &mut rng).unwrap();
                let b = Bounds::new(width, height).unwrap();
                for frame in 1..=30 {
                    host.time = frame as f64 / 60.0;
                    sim.tick(&mut host);
                    for p in sim.particles() {
                        prop_assert!(b.contains(p.position), "{:?}", p.position);
                        prop_assert!(p.speed() <= max_speed * (1.0 + 1e-9));
                    }
                }
            }
        }
    }
}
