//! Runtime simulation configuration loaded from `assets/particles.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/particles.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the settings you care about:
//!
//! ```toml
//! particle_count = 500
//! gravity_enabled = true
//!
//! [collision_response]
//! kind = "velocity_blend"
//! factor = 0.01
//! ```
//!
//! The toggles in here are only the *initial* state; at runtime they live in
//! [`crate::controls::Controls`].

use crate::collision::CollisionResponse;
use crate::constants::*;
use crate::error::{
    validate_batch_size, validate_dimension, validate_radius_bounds, validate_tick_rate,
    validate_time_scale, SimError, SimResult,
};
use crate::geometry::Bounds;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/particles.toml";

/// Runtime-tunable simulation configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Visible Bounds ───────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,
    pub tick_rate: u32,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub spawn_margin: f32,
    pub burst_range: f32,
    pub burst_count: usize,
    pub particle_count: usize,
    pub initial_speed: f32,

    // ── Geometry ─────────────────────────────────────────────────────────────
    pub min_radius: f32,
    pub max_radius: f32,
    pub attractor_min_radius: f32,
    pub attraction_strength: [f32; 2],

    // ── Forces & Time ────────────────────────────────────────────────────────
    pub gravity: [f32; 2],
    pub time_scale: f32,
    pub gravity_enabled: bool,
    pub freeze_on_collapse: bool,
    pub freeze_on_border_collapse: bool,
    pub collision_response: CollisionResponse,

    // ── Rendering ────────────────────────────────────────────────────────────
    pub palette: Vec<[f32; 3]>,

    /// Fixed RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            tick_rate: TICK_RATE,
            spawn_margin: SPAWN_MARGIN,
            burst_range: BURST_RANGE,
            burst_count: BURST_COUNT,
            particle_count: PARTICLE_COUNT,
            initial_speed: INITIAL_SPEED,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            attractor_min_radius: ATTRACTOR_MIN_RADIUS,
            attraction_strength: ATTRACTION_STRENGTH,
            gravity: GRAVITY,
            time_scale: TIME_SCALE,
            gravity_enabled: false,
            freeze_on_collapse: false,
            freeze_on_border_collapse: false,
            collision_response: CollisionResponse::Ignore,
            palette: PALETTE.to_vec(),
            seed: None,
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        Vec2::from_array(self.gravity)
    }

    #[inline]
    pub fn attraction(&self) -> Vec2 {
        Vec2::from_array(self.attraction_strength)
    }

    /// The spawn palette as Bevy colours.
    pub fn palette_colors(&self) -> Vec<Color> {
        self.palette
            .iter()
            .map(|&[r, g, b]| Color::srgb(r, g, b))
            .collect()
    }

    /// Check the settings the simulation cannot run without.
    pub fn validate(&self) -> SimResult<()> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;
        validate_tick_rate(self.tick_rate)?;
        validate_radius_bounds(self.min_radius, self.max_radius)?;
        validate_radius_bounds(self.attractor_min_radius, self.max_radius)?;
        validate_time_scale(self.time_scale)?;
        validate_batch_size("particle_count", self.particle_count, MAX_SPAWN_BATCH)?;
        validate_batch_size("burst_count", self.burst_count, MAX_SPAWN_BATCH)?;
        if self.palette.is_empty() {
            return Err(SimError::UnsafeConstant {
                name: "palette",
                value: 0.0,
                safe_range: "at least one colour",
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.  Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: SimConfig = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            path: "<inline>".into(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    ///
    /// A missing file is `Ok(None)`: the caller keeps whatever it already has.
    pub fn load_from_path(path: impl AsRef<Path>) -> SimResult<Option<Self>> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SimError::ConfigRead {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };
        Self::from_toml_str(&contents)
            .map(Some)
            .map_err(|e| match e {
                SimError::ConfigParse { reason, .. } => SimError::ConfigParse {
                    path: path.display().to_string(),
                    reason,
                },
                other => other,
            })
    }
}

/// Startup system: attempt to load `assets/particles.toml` and overwrite the
/// `SimConfig` resource with it.
///
/// Parse and validation errors are logged and the compiled defaults are kept.
/// A missing file is not an error.
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    match SimConfig::load_from_path(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded simulation config from {CONFIG_PATH}");
        }
        Ok(None) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("{e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = SimConfig::default();
        assert_eq!(config.width, FIELD_WIDTH);
        assert_eq!(config.particle_count, PARTICLE_COUNT);
        assert_eq!(config.palette.len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config = SimConfig::from_toml_str("particle_count = 12\ngravity_enabled = true\n")
            .expect("partial config should parse");
        assert_eq!(config.particle_count, 12);
        assert!(config.gravity_enabled);
        assert_eq!(config.max_radius, MAX_RADIUS);
        assert_eq!(config.collision_response, CollisionResponse::Ignore);
    }

    #[test]
    fn collision_response_is_selectable() {
        let config = SimConfig::from_toml_str(
            "[collision_response]\nkind = \"velocity_blend\"\nfactor = 0.05\n",
        )
        .expect("tagged response should parse");
        assert_eq!(
            config.collision_response,
            CollisionResponse::VelocityBlend { factor: 0.05 }
        );
    }

    #[test]
    fn oversized_particle_count_is_rejected() {
        let err = SimConfig::from_toml_str("particle_count = 70000000\n").unwrap_err();
        assert!(matches!(err, SimError::UnsafeConstant { name: "particle_count", .. }));
        assert!(SimConfig::from_toml_str("burst_count = 100001\n").is_err());
        assert!(SimConfig::from_toml_str("particle_count = 70000\n").is_ok());
    }

    #[test]
    fn x_blend_response_is_selectable() {
        let config = SimConfig::from_toml_str(
            "[collision_response]\nkind = \"x_blend\"\nself_weight = 0.1\nother_weight = 2.0\n",
        )
        .expect("x blend should parse");
        assert_eq!(config.collision_response, CollisionResponse::x_blend());
    }

    #[test]
    fn inverted_radius_bounds_are_rejected() {
        let err = SimConfig::from_toml_str("min_radius = 6.0\nmax_radius = 2.0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidRadiusBounds { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SimConfig::from_toml_str("particle_count = \"lots\"").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let loaded = SimConfig::load_from_path("assets/definitely-not-here.toml");
        assert_eq!(loaded, Ok(None));
    }
}
