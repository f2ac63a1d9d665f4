//! 2D vector helpers used by the proximity and attraction code.

use bevy::prelude::*;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Length of `v`.
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`, or zero when `v` has no usable length.
///
/// Coincident bodies produce a zero delta; returning zero keeps NaN out of
/// velocity state.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// The visible field: `[0, width] x [0, height]` in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
