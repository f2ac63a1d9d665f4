use crate::constants::ATTRACTION_OUTLINE_COLOR;
use crate::geometry::Bounds;
use crate::simulation::Simulation;
use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Map a field position (origin top-left, y down) to Bevy world space
/// (origin at the window center, y up).
#[inline]
pub fn field_to_world(pos: Vec2, bounds: Bounds) -> Vec2 {
    Vec2::new(pos.x - bounds.width / 2.0, bounds.height / 2.0 - pos.y)
}

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel.
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}

/// Resize the primary window to the configured field so cursor coordinates
/// and field coordinates coincide.
pub fn fit_window_to_field(
    sim: Res<Simulation>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    let bounds = sim.config().bounds();
    window.resolution.set(bounds.width, bounds.height);
}

/// Draw every live particle as a circle outline.
pub fn draw_particles_system(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let bounds = sim.config().bounds();
    for p in sim.live_particles() {
        gizmos.circle_2d(
            Isometry2d::from_translation(field_to_world(p.position, bounds)),
            p.radius(),
            p.color,
        );
    }
}

/// Draw each attractor's field, then its body on top.
pub fn draw_attractors_system(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let bounds = sim.config().bounds();
    let [r, g, b, a] = ATTRACTION_OUTLINE_COLOR;
    let outline = Color::srgba(r, g, b, a);
    for attractor in sim.attractors().iter().filter(|a| !a.removed) {
        let center = Isometry2d::from_translation(field_to_world(attractor.position, bounds));
        gizmos.circle_2d(center, attractor.attraction_radius(), outline);
        gizmos.circle_2d(center, attractor.radius(), attractor.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_corners_map_to_window_corners() {
        let bounds = Bounds::new(1000.0, 800.0);
        assert_eq!(field_to_world(Vec2::ZERO, bounds), Vec2::new(-500.0, 400.0));
        assert_eq!(field_to_world(Vec2::new(1000.0, 800.0), bounds), Vec2::new(500.0, -400.0));
        assert_eq!(field_to_world(Vec2::new(500.0, 400.0), bounds), Vec2::ZERO);
    }
}
