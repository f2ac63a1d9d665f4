//! Proximity tests for collision and attraction.
//!
//! Every query is a two-stage test: a cheap square prefilter, then an exact
//! distance check.  The prefilter is a conservative over-approximation and
//! callers must always follow it with the exact test.
//!
//! ## Prefilter shape
//!
//! The box is anchored on the **origin**, not on `center`: a candidate passes
//! when each of its coordinates lies within `±(center.axis + 2·influence)`.
//! For screen-space positions (all non-negative) this admits everything in
//! the quadrant up to `center + 2·influence`, so large influence radii admit
//! the whole field.  Collapse results depend on which candidates survive it,
//! so the shape is load-bearing.

use crate::geometry::distance;
use bevy::prelude::*;

/// Bounding prefilter.  See the module docs for the box shape.
#[inline]
pub fn in_range(center: Vec2, candidate: Vec2, influence_radius: f32) -> bool {
    let range_x = center.x + influence_radius * 2.0;
    let range_y = center.y + influence_radius * 2.0;
    candidate.x <= range_x
        && candidate.x >= -range_x
        && candidate.y <= range_y
        && candidate.y >= -range_y
}

/// Exact collision test.  Touching exactly at the radius sum is not a
/// collision.
#[inline]
pub fn overlaps(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    distance(a, b) < a_radius + b_radius
}

/// Exact attraction-field membership: the particle's edge reaches the field.
#[inline]
pub fn within_attraction(
    attractor: Vec2,
    attraction_radius: f32,
    particle: Vec2,
    particle_radius: f32,
) -> bool {
    distance(attractor, particle) <= attraction_radius + particle_radius
}
