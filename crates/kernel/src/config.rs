use std::path::Path;

use glam::UVec2;
use serde::{Deserialize, Serialize};

/// Errors from loading a world configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid world size {width}x{height}: both dimensions must be non-zero")]
    InvalidWorldSize { width: u32, height: u32 },
}

/// World configuration: applied once, before any entity is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Extent of the simulated world. Entities whose position leaves
    /// `[0, world_size)` are killed during the update phase.
    pub world_size: UVec2,
    /// Fixed tick length in milliseconds, passed to `evaluate`.
    pub tick_millis: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: UVec2::new(800, 600),
            tick_millis: 16,
        }
    }
}

impl WorldConfig {
    /// Read and validate a JSON configuration file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::debug!(
            width = config.world_size.x,
            height = config.world_size.y,
            tick_millis = config.tick_millis,
            "world config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size.x == 0 || self.world_size.y == 0 {
            return Err(ConfigError::InvalidWorldSize {
                width: self.world_size.x,
                height: self.world_size.y,
            });
        }
        Ok(())
    }
}
