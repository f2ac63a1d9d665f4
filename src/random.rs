//! Uniform sampling helpers shared by the spawners.

use bevy::prelude::*;
use rand::Rng;

/// Sample a float uniformly between `min` and `max`.
///
/// Total over any pair of finite bounds: when `max < min` the sample lies in
/// `[max, min]`, and equal bounds return that value.  Burst spawning relies on
/// this because its clamp fallback can invert a window.
pub fn random_float<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    let t: f32 = rng.gen_range(0.0..=1.0);
    min + t * (max - min)
}

/// Sample a vector whose components are each uniform in `[-extent, extent]`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec2 {
    Vec2::new(
        random_float(rng, -extent, extent),
        random_float(rng, -extent, extent),
    )
}

/// Pick a colour uniformly from `palette`.  An empty palette yields white.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Color]) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    palette[rng.gen_range(0..palette.len())]
}
