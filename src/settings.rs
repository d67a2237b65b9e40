//! Runtime configuration
//!
//! Native builds read an optional JSON file named by `FLAPPY_GATES_CONFIG`;
//! web builds read the same document from LocalStorage. Anything missing
//! falls back to the defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::World;

/// Environment variable naming the native config file
pub const CONFIG_ENV: &str = "FLAPPY_GATES_CONFIG";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("world width {0} must be a positive number")]
    InvalidWidth(f32),
    #[error("world height {height} is below the minimum of {min}")]
    WorldTooShort { height: f32, min: f32 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in world units
    pub world_width: f32,
    /// Playfield height in world units (ground strip included)
    pub world_height: f32,
    /// Fixed seed for the pipe layout; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Frame pacing for the terminal driver
    pub frame_millis: u64,
    /// Where the native best score lives; `None` uses the platform data dir
    pub best_score_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            seed: None,
            frame_millis: 16,
            best_score_path: None,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.world()?;
        Ok(settings)
    }

    /// Validated world dimensions
    pub fn world(&self) -> Result<World, SettingsError> {
        World::new(self.world_width, self.world_height)
    }

    /// Configured seed, or one derived from the current time
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Load settings from the file named by `FLAPPY_GATES_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = PathBuf::from(path);

        match std::fs::read_to_string(&path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_gates_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        let world = settings.world().unwrap();
        assert_eq!(world.width, 400.0);
        assert_eq!(world.height, 600.0);
        assert_eq!(settings.frame_millis, 16);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "world_height": 480 }"#).unwrap();
        assert_eq!(settings.seed(), 42);
        assert_eq!(settings.world_height, 480.0);
        assert_eq!(settings.world_width, DEFAULT_WORLD_WIDTH);
    }

    #[test]
    fn test_rejects_short_world() {
        let err = Settings::from_json(r#"{ "world_height": 150 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::WorldTooShort { .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
