//! Particle and attractor records plus the transient query results the engine
//! passes around.

use bevy::prelude::*;

/// A simulated body.
///
/// `radius` and `id` are fixed at creation and only readable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: i32,
    radius: f32,
    /// Skip gravity and integration while set.
    pub freeze: bool,
    /// Tombstone: the particle left the field and waits for compaction.
    pub removed: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
}

impl Particle {
    pub fn new(id: i32, radius: f32, position: Vec2, velocity: Vec2, color: Color) -> Self {
        Self {
            id,
            radius,
            freeze: false,
            removed: false,
            position,
            velocity,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Not tombstoned.
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.removed
    }
}

/// A moving point source that pulls nearby particles toward itself.
///
/// Never takes part in pairwise collapse, with particles or other attractors.
#[derive(Debug, Clone, PartialEq)]
pub struct Attractor {
    id: i32,
    radius: f32,
    attraction_radius: f32,
    /// Per-axis impulse magnitude applied to particles in range.
    pub attraction: Vec2,
    pub removed: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
}

impl Attractor {
    /// The field radius is derived from the body radius as `radius³`.
    pub fn new(id: i32, radius: f32, attraction: Vec2, position: Vec2, color: Color) -> Self {
        Self {
            id,
            radius,
            attraction_radius: radius.powi(3),
            attraction,
            removed: false,
            position,
            velocity: Vec2::ZERO,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn attraction_radius(&self) -> f32 {
        self.attraction_radius
    }

    /// Top-left origin of the influence indicator, for front ends that place
    /// circles by their bounding box.
    pub fn indicator_origin(&self) -> Vec2 {
        self.position - Vec2::splat(self.attraction_radius - self.radius)
    }
}

/// Anything the border check can look at.
pub trait Body {
    fn center(&self) -> Vec2;
    /// Body radius, not the attraction field.
    fn extent(&self) -> f32;
    fn is_removed(&self) -> bool;
}

impl Body for Particle {
    fn center(&self) -> Vec2 {
        self.position
    }
    fn extent(&self) -> f32 {
        self.radius
    }
    fn is_removed(&self) -> bool {
        self.removed
    }
}

impl Body for Attractor {
    fn center(&self) -> Vec2 {
        self.position
    }
    fn extent(&self) -> f32 {
        self.radius
    }
    fn is_removed(&self) -> bool {
        self.removed
    }
}

/// Which edge of the field a body touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Border {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl Border {
    #[inline]
    pub fn is_hit(self) -> bool {
        self != Border::None
    }
}

/// Outcome of one collapse scan.  Produced and consumed within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollapseResult {
    pub collapsed: bool,
    /// Index of the partner in the scanned collection.  Only valid until the
    /// collection is next mutated structurally.
    pub other: Option<usize>,
    pub distance: f32,
}

impl CollapseResult {
    pub fn hit(other: usize, distance: f32) -> Self {
        Self {
            collapsed: true,
            other: Some(other),
            distance,
        }
    }
}
