//! Runtime toggles the front end flips while the simulation runs.

use crate::config::SimConfig;
use crate::constants::{TIME_SCALE_FAST, TIME_SCALE_NORMAL, TIME_SCALE_SLOW};

/// Mutable run state, seeded from [`SimConfig`] and changed by input.
///
/// Changes take effect on the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub time_scale: f32,
    pub gravity_enabled: bool,
    pub freeze_on_collapse: bool,
    pub freeze_on_border_collapse: bool,
    pub paused: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

impl Controls {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            time_scale: config.time_scale,
            gravity_enabled: config.gravity_enabled,
            freeze_on_collapse: config.freeze_on_collapse,
            freeze_on_border_collapse: config.freeze_on_border_collapse,
            paused: false,
        }
    }

    pub fn toggle_gravity(&mut self) -> bool {
        self.gravity_enabled = !self.gravity_enabled;
        self.gravity_enabled
    }

    pub fn toggle_freeze_on_collapse(&mut self) -> bool {
        self.freeze_on_collapse = !self.freeze_on_collapse;
        self.freeze_on_collapse
    }

    pub fn toggle_freeze_on_border_collapse(&mut self) -> bool {
        self.freeze_on_border_collapse = !self.freeze_on_border_collapse;
        self.freeze_on_border_collapse
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Slow → normal; anything else → fast.
    pub fn speed_up(&mut self) -> f32 {
        self.time_scale = if self.time_scale == TIME_SCALE_SLOW {
            TIME_SCALE_NORMAL
        } else {
            TIME_SCALE_FAST
        };
        self.time_scale
    }

    /// Fast → normal; anything else → slow.
    pub fn slow_down(&mut self) -> f32 {
        self.time_scale = if self.time_scale == TIME_SCALE_FAST {
            TIME_SCALE_NORMAL
        } else {
            TIME_SCALE_SLOW
        };
        self.time_scale
    }
}
