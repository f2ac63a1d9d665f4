//! Border and pairwise collapse detection, and the pluggable collision
//! response.

use crate::constants::{VELOCITY_BLEND_FACTOR, X_BLEND_OTHER_WEIGHT, X_BLEND_SELF_WEIGHT};
use crate::geometry::{distance, Bounds};
use crate::particle::{Body, Border, CollapseResult, Particle};
use crate::spatial::{in_range, overlaps};
use serde::Deserialize;

/// Which edge, if any, `body` is touching.
///
/// Uses the diameter as margin on every edge except the left one, which uses
/// the radius.  Edges are checked right, left, top, bottom and the first hit
/// wins.  Removed bodies never touch anything.
pub fn border_collapse<B: Body + ?Sized>(body: &B, bounds: Bounds) -> Border {
    if body.is_removed() {
        return Border::None;
    }
    let pos = body.center();
    let radius = body.extent();
    let diameter = radius * 2.0;
    if pos.x + diameter > bounds.width {
        Border::Right
    } else if pos.x - radius < 0.0 {
        Border::Left
    } else if pos.y - diameter < 0.0 {
        Border::Top
    } else if pos.y + diameter > bounds.height {
        Border::Bottom
    } else {
        Border::None
    }
}

/// Find the first particle the one at `index` overlaps.
///
/// Scans `particles` in order and stops at the first overlap.  Reaching the
/// particle itself also stops the scan, without a hit: of any overlapping
/// pair, only the later one in the collection reports the contact.
/// `max_radius` sizes the prefilter box.
pub fn detect_collapse(particles: &[Particle], index: usize, max_radius: f32) -> CollapseResult {
    let Some(p) = particles.get(index) else {
        return CollapseResult::default();
    };
    for (j, other) in particles.iter().enumerate() {
        if other.removed || !in_range(p.position, other.position, max_radius) {
            continue;
        }
        if other.id() == p.id() {
            return CollapseResult::default();
        }
        if overlaps(p.position, p.radius(), other.position, other.radius()) {
            return CollapseResult::hit(j, distance(p.position, other.position));
        }
    }
    CollapseResult::default()
}

/// Mutable access to two distinct elements.
///
/// Returns `None` when `i == j` or either index is out of bounds.
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}

/// What happens to velocities when two particles collapse.
///
/// Runs after both particles' freeze flags have been updated.
pub trait CollisionResolver: Send + Sync {
    fn resolve(&self, a: &mut Particle, b: &mut Particle, distance: f32);
}

/// Built-in responses, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollisionResponse {
    /// Detection only; velocities are untouched.
    #[default]
    Ignore,
    /// Elastic approximation: nudge both velocities along the center line by
    /// `factor`.  Does not conserve momentum or energy.
    VelocityBlend { factor: f32 },
    /// Both particles take the x velocity
    /// `(a.vx * self_weight + b.vx * other_weight) / 2`, where `a` is the
    /// particle that detected the collapse.  Y velocities are untouched.
    XBlend { self_weight: f32, other_weight: f32 },
}

impl CollisionResponse {
    pub fn velocity_blend() -> Self {
        CollisionResponse::VelocityBlend {
            factor: VELOCITY_BLEND_FACTOR,
        }
    }

    pub fn x_blend() -> Self {
        CollisionResponse::XBlend {
            self_weight: X_BLEND_SELF_WEIGHT,
            other_weight: X_BLEND_OTHER_WEIGHT,
        }
    }
}

impl CollisionResolver for CollisionResponse {
    fn resolve(&self, a: &mut Particle, b: &mut Particle, distance: f32) {
        match *self {
            CollisionResponse::Ignore => {}
            CollisionResponse::VelocityBlend { factor } => {
                if distance <= 0.0 {
                    return;
                }
                let unit = (a.position - b.position) / distance;
                a.velocity -= unit * factor;
                b.velocity += unit * factor;
            }
            CollisionResponse::XBlend {
                self_weight,
                other_weight,
            } => {
                let vx = (a.velocity.x * self_weight + b.velocity.x * other_weight) / 2.0;
                a.velocity.x = vx;
                b.velocity.x = vx;
            }
        }
    }
}
