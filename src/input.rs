//! Keyboard and mouse bindings.
//!
//! | Input          | Action                              |
//! |----------------|-------------------------------------|
//! | F              | toggle freeze on particle collapse  |
//! | B              | toggle freeze on border collapse    |
//! | G              | toggle gravity                      |
//! | R              | reset (clear + repopulate)          |
//! | C              | clear                               |
//! | Space          | pause / resume                      |
//! | Right / Left   | speed up / slow down                |
//! | Left click     | burst spawn (repeats while held)    |
//! | Right click    | spawn attractor                     |

use crate::simulation::Simulation;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Toggle controls and run reset/clear from the keyboard.
pub fn keyboard_controls_system(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    if keys.just_pressed(KeyCode::KeyF) {
        let on = sim.controls_mut().toggle_freeze_on_collapse();
        info!("Freeze on collapse: {on}");
    }
    if keys.just_pressed(KeyCode::KeyB) {
        let on = sim.controls_mut().toggle_freeze_on_border_collapse();
        info!("Freeze on border collapse: {on}");
    }
    if keys.just_pressed(KeyCode::KeyG) {
        let on = sim.controls_mut().toggle_gravity();
        info!("Gravity: {on}");
    }
    if keys.just_pressed(KeyCode::KeyR) {
        sim.reset();
        info!("Reset: {} particles", sim.particles().len());
    }
    if keys.just_pressed(KeyCode::Space) {
        let paused = sim.controls_mut().toggle_pause();
        info!("Paused: {paused}");
    }
    if keys.just_pressed(KeyCode::KeyC) {
        sim.clear();
        info!("Cleared");
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        let scale = sim.controls_mut().speed_up();
        info!("Time scale: {scale}");
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        let scale = sim.controls_mut().slow_down();
        info!("Time scale: {scale}");
    }
}

/// Cursor position in field coordinates, if the cursor is over the window.
fn cursor_in_field(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    let window = windows.single().ok()?;
    // Both are top-left origin with y down; the window is sized to the field.
    window.cursor_position()
}

/// Left click: burst; right click: attractor.
pub fn mouse_spawn_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
) {
    let Some(cursor) = cursor_in_field(&windows) else {
        return;
    };
    if buttons.just_pressed(MouseButton::Left) {
        sim.spawn_default_burst(cursor);
    }
    if buttons.just_pressed(MouseButton::Right) {
        let id = sim.spawn_attractor(cursor);
        info!("Attractor {id} at ({:.0}, {:.0})", cursor.x, cursor.y);
    }
}

/// Whether a held left button spawns on the coming tick: not paused, and the
/// frame clock is about to land on an even value.
pub fn held_burst_due(sim: &Simulation) -> bool {
    !sim.is_paused() && sim.next_frame() % 2 == 0
}

/// Fixed-step system: while the left button is held, spawn a burst every
/// second tick.  Runs just before the tick and respects pause.
pub fn held_burst_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
) {
    if !buttons.pressed(MouseButton::Left) || !held_burst_due(&sim) {
        return;
    }
    if let Some(cursor) = cursor_in_field(&windows) {
        sim.spawn_default_burst(cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn held_burst_fires_when_the_ticked_frame_is_even() {
        let mut sim = Simulation::with_seed(SimConfig::default(), 5);
        // Clock at 0: the tick moves it to 1, so no burst.
        assert!(!held_burst_due(&sim));
        sim.tick();
        // Clock at 1: the tick moves it to 2.
        assert!(held_burst_due(&sim));
        sim.set_paused(true);
        assert!(!held_burst_due(&sim));
    }

    #[test]
    fn held_burst_fires_on_the_wrap_to_zero() {
        let config = SimConfig {
            tick_rate: 3,
            ..Default::default()
        };
        let mut sim = Simulation::with_seed(config, 5);
        sim.tick();
        sim.tick();
        assert_eq!(sim.frame(), 2);
        assert!(held_burst_due(&sim), "frame 2 wraps to 0 on the next tick");
    }
}
