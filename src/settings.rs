//! Game settings
//!
//! Persisted as `settings.json` next to the binary. Missing or unparseable
//! files fall back to defaults; the maze itself still validates dimensions.

use serde::{Deserialize, Serialize};

/// Grid, window and seed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Maze height in cells
    pub rows: usize,
    /// Maze width in cells
    pub cols: usize,
    /// Fixed seed for reproducible mazes; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Window size in pixels
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 20,
            seed: None,
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Settings {
    /// Settings file name, looked up in the working directory
    const FILE_NAME: &'static str = "settings.json";

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed {}: {err}", Self::FILE_NAME);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::FILE_NAME, json) {
                    log::warn!("Failed to save settings: {err}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }

    /// The seed this run will use: the configured one, or fresh entropy
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.rows, 16);
        assert_eq!(settings.cols, 20);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            rows: 8,
            cols: 10,
            seed: Some(424242),
            window_width: 800,
            window_height: 600,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, 8);
        assert_eq!(back.cols, 10);
        assert_eq!(back.seed, Some(424242));
    }

    #[test]
    fn test_fixed_seed_resolves_to_itself() {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        assert_eq!(settings.resolve_seed(), 7);
    }
}
