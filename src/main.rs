use bevy::prelude::*;
use bevy::window::WindowResolution;
use particle_field::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use particle_field::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Particles".into(),
                // Resized to the configured field once assets/particles.toml is loaded.
                resolution: WindowResolution::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(SimulationPlugin)
        .run();
}
