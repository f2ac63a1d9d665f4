//! Simulation driver, plugin and tick system.
//!
//! [`Simulation`] owns both collections and everything that changes between
//! ticks.  The front end talks to it only through its methods: spawn between
//! ticks, call [`Simulation::tick`] once per fixed step, then read positions
//! to draw.
//!
//! ## Tick order
//!
//! 1. Advance the frame clock.  Every `tick_rate` frames the clock wraps and
//!    tombstoned particles are compacted away (this also happens while paused).
//! 2. If paused, stop here.
//! 3. Run the engine step over particles, then attractors.
//! 4. Tombstone particles that left the field.

use crate::collision::{CollisionResolver, CollisionResponse};
use crate::config::{load_sim_config, SimConfig};
use crate::controls::Controls;
use crate::engine::{self, StepParams};
use crate::graphics;
use crate::input;
use crate::lifecycle::{self, IdAllocator, Spawner};
use crate::particle::{Attractor, Particle};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The whole simulation state.
#[derive(Resource)]
pub struct Simulation {
    particles: Vec<Particle>,
    attractors: Vec<Attractor>,
    config: SimConfig,
    controls: Controls,
    ids: IdAllocator,
    frames: u32,
    seconds: u64,
    rng: StdRng,
    resolver: Box<dyn CollisionResolver>,
}

impl Simulation {
    /// An empty simulation.  Seeds from `config.seed`, or from OS entropy
    /// when none is set.
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// An empty simulation with a fixed seed, regardless of `config.seed`.
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            attractors: Vec::new(),
            controls: Controls::from_config(&config),
            resolver: Box::new(config.collision_response),
            config,
            ids: IdAllocator::default(),
            frames: 0,
            seconds: 0,
            rng,
        }
    }

    // ── Ticking ──────────────────────────────────────────────────────────────

    /// Run one frame: clock, periodic compaction, and (unless paused) a step.
    pub fn tick(&mut self) {
        self.frames = self.next_frame();
        if self.frames == 0 {
            self.seconds += 1;
            self.compact();
        }
        if self.controls.paused {
            return;
        }
        self.step();
    }

    /// Advance the physics by one step with the current controls and mark
    /// particles that left the field.  Ignores the pause flag.
    pub fn step(&mut self) {
        let params = StepParams {
            bounds: self.config.bounds(),
            time_scale: self.controls.time_scale,
            gravity: self.config.gravity(),
            gravity_enabled: self.controls.gravity_enabled,
            freeze_on_collapse: self.controls.freeze_on_collapse,
            freeze_on_border_collapse: self.controls.freeze_on_border_collapse,
            max_radius: self.config.max_radius,
            response: self.resolver.as_ref(),
        };
        engine::step(&mut self.particles, &mut self.attractors, &params);
        lifecycle::mark_off_screen(&mut self.particles, self.config.bounds());
    }

    /// Evict tombstoned particles.  Returns how many went.
    pub fn compact(&mut self) -> usize {
        let evicted = lifecycle::compact(&mut self.particles);
        if evicted > 0 {
            debug!("Compacted {evicted} off-screen particles");
        }
        evicted
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    fn spawner(&mut self) -> Spawner<'_, StdRng> {
        Spawner {
            ids: &mut self.ids,
            rng: &mut self.rng,
            config: &self.config,
        }
    }

    /// Scatter `n` new particles over the field.
    pub fn init(&mut self, n: usize) {
        let mut particles = std::mem::take(&mut self.particles);
        self.spawner().init(n, &mut particles);
        self.particles = particles;
    }

    /// Spawn `count` particles around `point`.
    pub fn spawn_burst(&mut self, point: Vec2, count: usize) {
        let mut particles = std::mem::take(&mut self.particles);
        self.spawner().burst(point, count, &mut particles);
        self.particles = particles;
    }

    /// Spawn the configured burst size around `point`.
    pub fn spawn_default_burst(&mut self, point: Vec2) {
        self.spawn_burst(point, self.config.burst_count);
    }

    /// Spawn one attractor at `point` and return its id.
    pub fn spawn_attractor(&mut self, point: Vec2) -> i32 {
        let mut attractors = std::mem::take(&mut self.attractors);
        let id = self.spawner().attractor(point, &mut attractors);
        self.attractors = attractors;
        id
    }

    /// Append a particle with explicit state and return its id.
    pub fn insert_particle(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        color: Color,
    ) -> i32 {
        let id = self.ids.assign(1);
        self.particles
            .push(Particle::new(id, radius, position, velocity, color));
        id
    }

    /// Drop every particle and attractor and restart id allocation.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.attractors.clear();
        self.ids.reset();
    }

    /// [`clear`](Self::clear), then scatter `particle_count` fresh particles.
    pub fn reset(&mut self) {
        self.clear();
        self.init(self.config.particle_count);
    }

    // ── Controls ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.controls.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.controls.paused = paused;
    }

    #[inline]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    #[inline]
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Replace the collision response with one of the built-ins.
    pub fn set_collision_response(&mut self, response: CollisionResponse) {
        self.resolver = Box::new(response);
    }

    /// Replace the collision response with a custom strategy.
    pub fn set_collision_resolver(&mut self, resolver: Box<dyn CollisionResolver>) {
        self.resolver = resolver;
    }

    // ── Read access ──────────────────────────────────────────────────────────

    /// Every particle, tombstoned ones included.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access for front ends and tests that stage specific layouts.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_live())
    }

    #[inline]
    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Frames since the last compaction.
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frames
    }

    /// The value [`frame`](Self::frame) will hold once the next tick has
    /// advanced the clock.
    pub fn next_frame(&self) -> u32 {
        let next = self.frames + 1;
        if next >= self.config.tick_rate {
            0
        } else {
            next
        }
    }

    /// Completed `tick_rate`-frame periods.
    #[inline]
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    #[inline]
    pub fn id_high_water(&self) -> i32 {
        self.ids.high_water()
    }
}

/// Registers the simulation resources and systems.
///
/// Expects `DefaultPlugins` (window, input, gizmos) to be present.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimConfig::default())
            .add_systems(
                Startup,
                (
                    // Load config first so the simulation is built from the final values.
                    load_sim_config,
                    setup_simulation,
                    graphics::setup_camera,
                    graphics::fit_window_to_field,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (input::held_burst_system, tick_system).chain(),
            )
            .add_systems(
                Update,
                (
                    input::keyboard_controls_system,
                    input::mouse_spawn_system,
                    graphics::draw_particles_system,
                    graphics::draw_attractors_system,
                ),
            );
    }
}

/// Startup system: build the simulation from the loaded config, populate it,
/// and pace `FixedUpdate` at the configured tick rate.
pub fn setup_simulation(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut fixed_time: ResMut<Time<Fixed>>,
) {
    let mut sim = Simulation::new(config.clone());
    sim.reset();
    fixed_time.set_timestep_hz(f64::from(config.tick_rate));
    info!(
        "Simulation ready: {} particles, {} ticks/s",
        sim.particles().len(),
        config.tick_rate
    );
    commands.insert_resource(sim);
}

/// Fixed-step system: one simulation tick.
pub fn tick_system(mut sim: ResMut<Simulation>) {
    sim.tick();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Simulation {
        Simulation::with_seed(SimConfig::default(), 9)
    }

    #[test]
    fn reset_populates_configured_count() {
        let mut sim = seeded();
        sim.reset();
        assert_eq!(sim.particles().len(), sim.config().particle_count);
        assert!(sim.attractors().is_empty());
    }

    #[test]
    fn clear_empties_everything_and_restarts_ids() {
        let mut sim = seeded();
        sim.reset();
        sim.spawn_attractor(Vec2::new(500.0, 500.0));
        sim.clear();
        assert!(sim.particles().is_empty());
        assert!(sim.attractors().is_empty());
        assert_eq!(sim.id_high_water(), 0);
    }

    #[test]
    fn next_frame_predicts_the_clock_after_a_tick() {
        let mut sim = Simulation::with_seed(
            SimConfig {
                tick_rate: 3,
                ..Default::default()
            },
            9,
        );
        for _ in 0..7 {
            let predicted = sim.next_frame();
            sim.tick();
            assert_eq!(sim.frame(), predicted);
        }
        assert_eq!(sim.seconds(), 2);
    }

    #[test]
    fn compaction_waits_for_the_tick_rate_boundary() {
        let mut sim = seeded();
        sim.insert_particle(Vec2::new(-100.0, 500.0), Vec2::ZERO, 2.0, Color::WHITE);
        sim.insert_particle(Vec2::new(500.0, 500.0), Vec2::ZERO, 2.0, Color::WHITE);

        sim.tick();
        assert!(sim.particles()[0].removed, "marked in the first tick");
        assert_eq!(sim.particles().len(), 2, "not yet evicted");

        let rate = sim.config().tick_rate;
        for _ in 1..rate - 1 {
            sim.tick();
        }
        assert_eq!(sim.particles().len(), 2);
        sim.tick();
        assert_eq!(sim.particles().len(), 1);
        assert_eq!(sim.seconds(), 1);
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn paused_tick_moves_nothing_but_still_compacts() {
        let mut sim = seeded();
        sim.insert_particle(Vec2::new(500.0, 500.0), Vec2::new(3.0, 0.0), 2.0, Color::WHITE);
        sim.set_paused(true);

        for _ in 0..sim.config().tick_rate {
            sim.tick();
        }
        assert_eq!(sim.particles()[0].position, Vec2::new(500.0, 500.0));
        assert_eq!(sim.seconds(), 1);
    }

    #[test]
    fn spawns_still_apply_while_paused() {
        let mut sim = seeded();
        sim.set_paused(true);
        sim.spawn_burst(Vec2::new(500.0, 500.0), 5);
        sim.spawn_attractor(Vec2::new(200.0, 200.0));
        assert_eq!(sim.particles().len(), 5);
        assert_eq!(sim.attractors().len(), 1);
    }

    #[test]
    fn time_scale_change_applies_to_next_step() {
        let mut sim = seeded();
        sim.insert_particle(Vec2::new(500.0, 500.0), Vec2::new(2.0, 0.0), 2.0, Color::WHITE);
        sim.controls_mut().time_scale = 1.0;
        sim.step();
        assert_eq!(sim.particles()[0].position, Vec2::new(502.0, 500.0));
        assert_eq!(sim.controls_mut().slow_down(), 0.5);
        sim.step();
        assert_eq!(sim.particles()[0].position, Vec2::new(503.0, 500.0));
    }

    #[test]
    fn tick_system_runs_in_a_schedule() {
        let mut world = World::new();
        let mut sim = seeded();
        sim.insert_particle(Vec2::new(500.0, 500.0), Vec2::new(2.0, 0.0), 2.0, Color::WHITE);
        world.insert_resource(sim);

        let mut schedule = Schedule::default();
        schedule.add_systems(tick_system);
        schedule.run(&mut world);

        let sim = world.resource::<Simulation>();
        assert_eq!(sim.frame(), 1);
        assert_eq!(sim.particles()[0].position, Vec2::new(501.0, 500.0));
    }
}
