use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::formation::Formation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How propeller spin is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinTiming {
    /// Fixed increment per rendered frame; apparent speed follows the refresh rate.
    #[default]
    PerFrame,
    /// Increment scaled by frame time so a 60 Hz display matches `PerFrame`.
    PerSecond,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub drone_count: usize,
    pub initial_formation: Formation,
    pub tween_duration_secs: f32,
    pub spin_per_frame: f32,
    pub spin_timing: SpinTiming,
    pub orbit_damping: f32,
    pub log_filter: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            window_title: "Drone Formations".to_string(),
            window_width: 1280,
            window_height: 800,
            drone_count: 9,
            initial_formation: Formation::Grid,
            tween_duration_secs: 1.0,
            spin_per_frame: 0.1,
            spin_timing: SpinTiming::PerFrame,
            orbit_damping: 0.05,
            log_filter: "wgpu=error,naga=warn,drone_formations=info".to_string(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid {
                field: "window_width/window_height",
                reason: format!("{}x{} has no area", self.window_width, self.window_height),
            });
        }
        if !self.tween_duration_secs.is_finite() || self.tween_duration_secs < 0.0 {
            return Err(ConfigError::Invalid {
                field: "tween_duration_secs",
                reason: format!("{} is not a non-negative duration", self.tween_duration_secs),
            });
        }
        if !self.spin_per_frame.is_finite() {
            return Err(ConfigError::Invalid {
                field: "spin_per_frame",
                reason: "must be finite".to_string(),
            });
        }
        if !(self.orbit_damping > 0.0 && self.orbit_damping <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "orbit_damping",
                reason: format!("{} is outside (0, 1]", self.orbit_damping),
            });
        }
        Ok(())
    }
}
