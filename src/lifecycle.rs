//! Particle lifecycle: id allocation, spawning, off-screen tombstoning and
//! compaction.
//!
//! Spawners only ever append.  They run between ticks, never while the engine
//! holds the collections.

use crate::config::SimConfig;
use crate::constants::ATTRACTOR_COLOR;
use crate::geometry::Bounds;
use crate::particle::{Attractor, Particle};
use crate::random::{random_color, random_float, random_velocity};
use bevy::prelude::*;
use rand::Rng;

/// Hands out particle and attractor ids.
///
/// Particle ids are `high_water + offset`, and the high-water mark only moves
/// up.  Spawners pass `offset = 1`, so ids run sequentially and every new id
/// is strictly greater than any id already handed out.  The sum saturates at
/// `i32::MAX` instead of wrapping.  Attractors draw from a separate counter that
/// counts down from -1 and therefore never meets a particle id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    high_water: i32,
    last_attractor: i32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            high_water: 0,
            last_attractor: -1,
        }
    }
}

impl IdAllocator {
    /// Id for a new particle.
    pub fn assign(&mut self, offset: i32) -> i32 {
        let id = self.high_water.saturating_add(offset);
        if id >= self.high_water {
            self.high_water = id;
        }
        id
    }

    /// Id for a new attractor.
    pub fn assign_attractor(&mut self) -> i32 {
        self.last_attractor -= 1;
        self.last_attractor
    }

    #[inline]
    pub fn high_water(&self) -> i32 {
        self.high_water
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything a spawner needs to mint a particle.
pub struct Spawner<'a, R: Rng + ?Sized> {
    pub ids: &'a mut IdAllocator,
    pub rng: &'a mut R,
    pub config: &'a SimConfig,
}

impl<R: Rng + ?Sized> Spawner<'_, R> {
    fn particle(&mut self, offset: i32, position: Vec2, palette: &[Color]) -> Particle {
        let radius = random_float(&mut *self.rng, self.config.min_radius, self.config.max_radius);
        let velocity = random_velocity(&mut *self.rng, self.config.initial_speed);
        let color = random_color(&mut *self.rng, palette);
        Particle::new(self.ids.assign(offset), radius, position, velocity, color)
    }

    /// Append `n` particles scattered over the field, keeping
    /// `spawn_margin` clear of every edge.
    pub fn init(&mut self, n: usize, particles: &mut Vec<Particle>) {
        let palette = self.config.palette_colors();
        let margin = self.config.spawn_margin;
        let (width, height) = (self.config.width, self.config.height);
        particles.reserve(n);
        for _ in 0..n {
            let position = Vec2::new(
                random_float(&mut *self.rng, margin, width - margin),
                random_float(&mut *self.rng, margin, height - margin),
            );
            let p = self.particle(1, position, &palette);
            particles.push(p);
        }
    }

    /// Append `count` particles around `point`, inside [`burst_window`].
    pub fn burst(&mut self, point: Vec2, count: usize, particles: &mut Vec<Particle>) {
        let palette = self.config.palette_colors();
        let (min, max) = burst_window(point, self.config);
        particles.reserve(count);
        for _ in 0..count {
            let position = Vec2::new(
                random_float(&mut *self.rng, min.x, max.x),
                random_float(&mut *self.rng, min.y, max.y),
            );
            let p = self.particle(1, position, &palette);
            particles.push(p);
        }
    }

    /// Append one motionless attractor at `point`.
    pub fn attractor(&mut self, point: Vec2, attractors: &mut Vec<Attractor>) -> i32 {
        let radius = random_float(
            &mut *self.rng,
            self.config.attractor_min_radius,
            self.config.max_radius,
        );
        let [r, g, b] = ATTRACTOR_COLOR;
        let id = self.ids.assign_attractor();
        attractors.push(Attractor::new(
            id,
            radius,
            self.config.attraction(),
            point,
            Color::srgb(r, g, b),
        ));
        id
    }
}

/// Sampling window `(min, max)` for a burst at `point`.
///
/// Starts as `point ± burst_range`.  A bound that reaches past the field edge
/// is replaced by an offset of `spawn_margin` on the other side of `point`.
/// The vertical checks rewrite the *horizontal* bounds from the point's y
/// coordinate, leaving the vertical window as it was; the resulting window
/// can be inverted, which sampling tolerates.
pub fn burst_window(point: Vec2, config: &SimConfig) -> (Vec2, Vec2) {
    let range = config.burst_range;
    let margin = config.spawn_margin;

    let mut min_x = point.x - range;
    if min_x <= 0.0 {
        min_x = point.x + margin;
    }
    let mut max_x = point.x + range;
    if max_x >= config.width {
        max_x = point.x - margin;
    }
    let min_y = point.y - range;
    if min_y <= 0.0 {
        min_x = point.y + margin;
    }
    let max_y = point.y + range;
    if max_y >= config.height {
        max_x = point.y - margin;
    }

    (Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
}

/// Tombstone every live particle more than twice its radius outside the
/// field on either axis.  Returns how many were newly marked.
pub fn mark_off_screen(particles: &mut [Particle], bounds: Bounds) -> usize {
    let mut marked = 0;
    for p in particles.iter_mut().filter(|p| !p.removed) {
        let margin = p.radius() * 2.0;
        let off_x = p.position.x + margin < 0.0 || p.position.x - margin > bounds.width;
        let off_y = p.position.y + margin < 0.0 || p.position.y - margin > bounds.height;
        if off_x || off_y {
            p.removed = true;
            marked += 1;
        }
    }
    marked
}

/// Evict tombstoned particles, keeping survivors in order.  Returns how many
/// were evicted.
pub fn compact(particles: &mut Vec<Particle>) -> usize {
    let before = particles.len();
    particles.retain(|p| !p.removed);
    before - particles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(id: i32, x: f32, y: f32) -> Particle {
        Particle::new(id, 2.0, Vec2::new(x, y), Vec2::ZERO, Color::WHITE)
    }

    // ── IdAllocator ───────────────────────────────────────────────────────────

    #[test]
    fn ids_strictly_increase_across_batches() {
        let mut ids = IdAllocator::default();
        let first: Vec<i32> = (1..=3).map(|i| ids.assign(i)).collect();
        let second: Vec<i32> = (1..=3).map(|i| ids.assign(i)).collect();
        let all: Vec<i32> = first.iter().chain(second.iter()).copied().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]), "ids not increasing: {all:?}");
    }

    #[test]
    fn assign_saturates_instead_of_wrapping() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.assign(i32::MAX - 1), i32::MAX - 1);
        assert_eq!(ids.assign(1), i32::MAX);
        assert_eq!(ids.assign(1), i32::MAX);
        assert_eq!(ids.high_water(), i32::MAX);
    }

    #[test]
    fn negative_offset_never_lowers_high_water() {
        let mut ids = IdAllocator::default();
        ids.assign(5);
        let id = ids.assign(-3);
        assert_eq!(id, 2);
        assert_eq!(ids.high_water(), 5);
    }

    #[test]
    fn attractor_ids_count_down_and_reset() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.assign_attractor(), -2);
        assert_eq!(ids.assign_attractor(), -3);
        ids.assign(4);
        ids.reset();
        assert_eq!(ids, IdAllocator::default());
    }

    // ── Spawner ───────────────────────────────────────────────────────────────

    #[test]
    fn init_respects_margin_and_radius_bounds() {
        let config = SimConfig::default();
        let mut ids = IdAllocator::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut particles = Vec::new();
        Spawner { ids: &mut ids, rng: &mut rng, config: &config }.init(100, &mut particles);

        assert_eq!(particles.len(), 100);
        for p in &particles {
            assert!(p.position.x >= 20.0 && p.position.x <= 980.0);
            assert!(p.position.y >= 20.0 && p.position.y <= 980.0);
            assert!(p.radius() >= 1.0 && p.radius() <= 5.0);
            assert!(p.velocity.x.abs() <= 10.0 && p.velocity.y.abs() <= 10.0);
            assert!(!p.freeze && !p.removed);
        }
    }

    #[test]
    fn large_init_hands_out_sequential_ids() {
        let config = SimConfig::default();
        let mut ids = IdAllocator::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut particles = Vec::new();
        let mut spawner = Spawner { ids: &mut ids, rng: &mut rng, config: &config };
        spawner.init(70_000, &mut particles);
        spawner.burst(Vec2::new(500.0, 500.0), 20, &mut particles);

        assert_eq!(particles.len(), 70_020);
        assert!(particles.iter().enumerate().all(|(i, p)| p.id() == i as i32 + 1));
        assert_eq!(ids.high_water(), 70_020);
    }

    #[test]
    fn attractor_spawns_at_point_with_fixed_strength() {
        let config = SimConfig::default();
        let mut ids = IdAllocator::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attractors = Vec::new();
        let point = Vec2::new(300.0, 400.0);
        let id = Spawner { ids: &mut ids, rng: &mut rng, config: &config }
            .attractor(point, &mut attractors);

        let a = &attractors[0];
        assert_eq!(a.id(), id);
        assert!(id < 0);
        assert_eq!(a.position, point);
        assert_eq!(a.velocity, Vec2::ZERO);
        assert_eq!(a.attraction, Vec2::new(10.0, 10.0));
        assert!(a.radius() >= 2.5 && a.radius() <= 5.0);
    }

    // ── burst_window ──────────────────────────────────────────────────────────

    #[test]
    fn burst_window_centered_away_from_edges() {
        let (min, max) = burst_window(Vec2::new(500.0, 500.0), &SimConfig::default());
        assert_eq!(min, Vec2::new(480.0, 480.0));
        assert_eq!(max, Vec2::new(520.0, 520.0));
    }

    #[test]
    fn burst_window_left_edge_shifts_min_x() {
        let (min, max) = burst_window(Vec2::new(10.0, 500.0), &SimConfig::default());
        assert_eq!(min.x, 30.0);
        assert_eq!(max.x, 30.0);
    }

    #[test]
    fn burst_window_top_edge_rewrites_x_not_y() {
        let (min, max) = burst_window(Vec2::new(500.0, 10.0), &SimConfig::default());
        assert_eq!(min, Vec2::new(30.0, -10.0));
        assert_eq!(max, Vec2::new(520.0, 30.0));
    }

    #[test]
    fn burst_window_bottom_edge_rewrites_max_x() {
        let (min, max) = burst_window(Vec2::new(500.0, 990.0), &SimConfig::default());
        assert_eq!(min, Vec2::new(480.0, 970.0));
        assert_eq!(max, Vec2::new(970.0, 1010.0));
    }

    // ── off-screen marking & compaction ───────────────────────────────────────

    #[test]
    fn off_screen_needs_twice_the_radius() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let mut ps = vec![
            particle(1, -3.9, 500.0),
            particle(2, -4.1, 500.0),
            particle(3, 500.0, 1004.1),
            particle(4, 500.0, 500.0),
        ];
        assert_eq!(mark_off_screen(&mut ps, bounds), 2);
        let removed: Vec<bool> = ps.iter().map(|p| p.removed).collect();
        assert_eq!(removed, vec![false, true, true, false]);
    }

    #[test]
    fn compact_preserves_survivor_order() {
        let mut ps = vec![
            particle(1, 0.0, 0.0),
            particle(2, 0.0, 0.0),
            particle(3, 0.0, 0.0),
            particle(4, 0.0, 0.0),
        ];
        ps[0].removed = true;
        ps[2].removed = true;
        assert_eq!(compact(&mut ps), 2);
        let ids: Vec<i32> = ps.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
