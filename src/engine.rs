//! The per-tick update: border and collapse checks, freeze policy, gravity,
//! attraction and integration.
//!
//! One call to [`step`] runs one tick over both collections.  Particles are
//! processed first, in collection order, then attractors.  Nothing here
//! inserts or removes elements, so indices held in a [`CollapseResult`] stay
//! valid for the whole tick.
//!
//! [`CollapseResult`]: crate::particle::CollapseResult

use crate::collision::{border_collapse, detect_collapse, pair_mut, CollisionResolver};
use crate::geometry::{normalize, Bounds};
use crate::particle::{Attractor, Particle};
use crate::spatial::{in_range, within_attraction};
use bevy::prelude::*;

/// Everything a tick reads besides the collections themselves.
#[derive(Clone, Copy)]
pub struct StepParams<'a> {
    pub bounds: Bounds,
    /// Scales gravity and velocity integration alike.
    pub time_scale: f32,
    pub gravity: Vec2,
    pub gravity_enabled: bool,
    /// Value written to `freeze` on both particles of a collapse.
    pub freeze_on_collapse: bool,
    /// Value written to `freeze` when a particle touches a border.
    pub freeze_on_border_collapse: bool,
    /// Influence radius of the collision prefilter.
    pub max_radius: f32,
    pub response: &'a dyn CollisionResolver,
}

/// Advance both collections by one tick.
pub fn step(particles: &mut [Particle], attractors: &mut [Attractor], params: &StepParams<'_>) {
    for i in 0..particles.len() {
        update_particle(particles, i, params);
    }
    for attractor in attractors.iter_mut() {
        update_attractor(attractor, particles, params);
    }
}

fn update_particle(particles: &mut [Particle], i: usize, params: &StepParams<'_>) {
    if particles[i].removed {
        return;
    }

    if border_collapse(&particles[i], params.bounds).is_hit() {
        particles[i].freeze = params.freeze_on_border_collapse;
    }

    let collapse = detect_collapse(particles, i, params.max_radius);
    if let Some(j) = collapse.other.filter(|_| collapse.collapsed) {
        if let Some((p, other)) = pair_mut(particles, i, j) {
            p.freeze = params.freeze_on_collapse;
            other.freeze = params.freeze_on_collapse;
            params.response.resolve(p, other, collapse.distance);
        }
    }

    let p = &mut particles[i];
    if !p.freeze {
        if params.gravity_enabled {
            p.velocity += params.gravity * params.time_scale;
        }
        p.position += p.velocity * params.time_scale;
    }
}

fn update_attractor(
    attractor: &mut Attractor,
    particles: &mut [Particle],
    params: &StepParams<'_>,
) {
    if attractor.removed {
        return;
    }
    if params.gravity_enabled {
        attractor.velocity += params.gravity * params.time_scale;
    }
    // Attractors have no freeze state: touching a border just holds them in
    // place for this tick.
    if !border_collapse(attractor, params.bounds).is_hit() {
        attractor.position += attractor.velocity * params.time_scale;
    }
    apply_attraction(attractor, particles, params.time_scale);
}

/// Pull every live particle inside `attractor`'s field toward it.
///
/// The impulse is the unit vector toward the attractor scaled per axis by
/// `attraction` and by `time_scale`, added to velocity every tick the particle
/// stays in range.
pub fn apply_attraction(attractor: &Attractor, particles: &mut [Particle], time_scale: f32) {
    if attractor.removed {
        return;
    }
    let field = attractor.attraction_radius();
    for p in particles.iter_mut() {
        if p.removed || !in_range(attractor.position, p.position, field) {
            continue;
        }
        if !within_attraction(attractor.position, field, p.position, p.radius()) {
            continue;
        }
        let direction = normalize(attractor.position - p.position);
        p.velocity += direction * attractor.attraction * time_scale;
    }
}
