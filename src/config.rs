// Tuning loaded from TOML
//
// Every field has a default, so a config file only needs the values it
// changes:
//
// ```toml
// [movement]
// jump_force = 3.5
//
// [combat]
// combo_window = 0.4
// ```

use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::game::characters::{CharacterStats, CombatTuning};

/// Default config file looked up next to the binary's working directory
pub const DEFAULT_CONFIG_PATH: &str = "moonfall.toml";

/// Config loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All tunable gameplay values
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: CharacterStats,
    pub combat: CombatTuning,
}

impl GameConfig {
    /// Parse a TOML document
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a file; a missing file is an error
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from a file, falling back to defaults when it doesn't exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
