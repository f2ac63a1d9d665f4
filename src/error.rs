//! Simulation-specific error types.
//!
//! The per-tick simulation is total and never fails; errors only arise at the
//! edges, when configuration is read from disk or validated.
//!
//! ## Usage
//!
//! ```rust
//! use particle_field::config::SimConfig;
//! use particle_field::error::SimResult;
//!
//! fn load() -> SimResult<SimConfig> {
//!     let config = SimConfig::from_toml_str("particle_count = 50")?;
//!     Ok(config)
//! }
//! # load().unwrap();
//! ```

use std::fmt;

/// Top-level error enum for the particle simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        /// Path that was read.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The configuration file is not valid TOML for [`crate::config::SimConfig`].
    ConfigParse {
        path: String,
        reason: String,
    },

    /// `min` must be strictly positive and not greater than `max`.
    InvalidRadiusBounds { min: f32, max: f32 },

    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the setting (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigRead { path, reason } => {
                write!(f, "failed to read config '{}': {}", path, reason)
            }
            SimError::ConfigParse { path, reason } => {
                write!(f, "failed to parse config '{}': {}", path, reason)
            }
            SimError::InvalidRadiusBounds { min, max } => write!(
                f,
                "invalid radius bounds: min {} must be > 0 and <= max {}",
                min, max
            ),
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `0 < min <= max`.
pub fn validate_radius_bounds(min: f32, max: f32) -> SimResult<()> {
    if min > 0.0 && min <= max {
        Ok(())
    } else {
        Err(SimError::InvalidRadiusBounds { min, max })
    }
}

/// Returns an error if a field dimension is not strictly positive.
pub fn validate_dimension(name: &'static str, value: f32) -> SimResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if the tick rate is zero.  Compaction runs once every
/// `tick_rate` ticks, so zero would never compact.
pub fn validate_tick_rate(value: u32) -> SimResult<()> {
    if value == 0 {
        Err(SimError::UnsafeConstant {
            name: "tick_rate",
            value: value as f32,
            safe_range: "[1, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error unless a spawn batch size is at most `max`.
pub fn validate_batch_size(name: &'static str, value: usize, max: usize) -> SimResult<()> {
    if value <= max {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value: value as f32,
            safe_range: "[0, MAX_SPAWN_BATCH]",
        })
    }
}

/// Returns an error if the time scale is negative or non-finite.
pub fn validate_time_scale(value: f32) -> SimResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "time_scale",
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
