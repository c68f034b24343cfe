//! Engine configuration
//!
//! [`EngineConfig`] groups the search and learning parameters. Every field has
//! a default, so a partial JSON document (or none at all) yields a usable
//! configuration.
//!
//! # File Location
//!
//! [`default_config_path`] resolves `engine.json` in the user's configuration
//! directory, falling back to the working directory when the platform has no
//! config dir.
//!
//! # Error Handling
//!
//! [`EngineConfig::load`] never fails: a missing or unparsable file falls back
//! to defaults with a log line. Range checks happen in
//! [`EngineConfig::validate`], which [`crate::Engine::new`] calls, and in
//! [`LearningConfig::validate`], which the learning store applies on its own.

use crate::error::{EngineError, EngineResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration filename
const CONFIG_FILENAME: &str = "engine.json";

/// Tree search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the root
    pub depth: u32,
    /// Maximum number of transposition entries before LRU eviction
    pub transposition_capacity: usize,
    /// Keep transposition entries across move choices until the game ends
    pub retain_transpositions: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            transposition_capacity: 400_000,
            retain_transpositions: false,
        }
    }
}

/// Learning store parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// When false the store is read-only: no plies, no updates, no saves
    pub enabled: bool,
    pub initial_epsilon: f64,
    /// Multiplicative ε decay applied once per finished game
    pub epsilon_decay: f64,
    pub epsilon_floor: f64,
    /// Step size α of the value update
    pub learning_rate: f64,
    /// Per-ply discount γ applied walking back from the final position
    pub discount: f64,
    /// Save every N finished games
    pub save_interval: u64,
    /// Number of finished game records kept in the rolling log
    pub history_capacity: usize,
    /// Maximum number of learned positions before LRU eviction
    pub max_positions: usize,
    /// Upper bound of the learned-value blend weight
    pub max_weight: f64,
    /// Blend weight gained per finished game
    pub weight_per_game: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_epsilon: 0.35,
            epsilon_decay: 0.995,
            epsilon_floor: 0.05,
            learning_rate: 0.15,
            discount: 0.92,
            save_interval: 10,
            history_capacity: 50,
            max_positions: 200_000,
            max_weight: 0.40,
            weight_per_game: 0.002,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub learning: LearningConfig,
    /// Seed for the exploration RNG; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Load configuration from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("[ENGINE] No config file found at {:?}. Using defaults.", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<EngineConfig>(&contents) {
                Ok(config) => {
                    info!("[ENGINE] Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "[ENGINE] Failed to parse config file at {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "[ENGINE] Failed to read config file at {:?}: {}. Using defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject values outside the ranges the engine can work with
    pub fn validate(&self) -> EngineResult<()> {
        let search = &self.search;

        if search.depth == 0 {
            return Err(invalid("search.depth", "must be at least 1"));
        }
        if search.transposition_capacity == 0 {
            return Err(invalid(
                "search.transposition_capacity",
                "must be at least 1",
            ));
        }
        self.learning.validate()
    }
}

impl LearningConfig {
    /// Range checks for the learning parameters alone
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&self.initial_epsilon) {
            return Err(invalid("learning.initial_epsilon", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.epsilon_floor) {
            return Err(invalid("learning.epsilon_floor", "must be within [0, 1]"));
        }
        if self.epsilon_floor > self.initial_epsilon {
            return Err(invalid(
                "learning.epsilon_floor",
                "must not exceed learning.initial_epsilon",
            ));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(invalid("learning.epsilon_decay", "must be within (0, 1]"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid("learning.learning_rate", "must be within (0, 1]"));
        }
        if !(self.discount > 0.0 && self.discount < 1.0) {
            return Err(invalid("learning.discount", "must be within (0, 1)"));
        }
        if self.save_interval == 0 {
            return Err(invalid("learning.save_interval", "must be at least 1"));
        }
        if self.history_capacity == 0 {
            return Err(invalid("learning.history_capacity", "must be at least 1"));
        }
        if self.max_positions == 0 {
            return Err(invalid("learning.max_positions", "must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.max_weight) {
            return Err(invalid("learning.max_weight", "must be within [0, 1)"));
        }
        if !(self.weight_per_game >= 0.0 && self.weight_per_game.is_finite()) {
            return Err(invalid(
                "learning.weight_per_game",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field,
        message: message.to_owned(),
    }
}

/// Path of `engine.json` in the user's configuration directory
pub fn default_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "XFChess") {
        proj_dirs.config_dir().join(CONFIG_FILENAME)
    } else {
        PathBuf::from(CONFIG_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "search": { "depth": 2 }, "seed": 7 }"#).unwrap();
        assert_eq!(config.search.depth, 2);
        assert_eq!(config.search.transposition_capacity, 400_000);
        assert_eq!(config.learning, LearningConfig::default());
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let mut config = EngineConfig::default();
        config.search.depth = 0;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig {
                field: "search.depth",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_floor_above_initial() {
        let mut config = EngineConfig::default();
        config.learning.initial_epsilon = 0.1;
        config.learning.epsilon_floor = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_full_weight() {
        let mut config = EngineConfig::default();
        config.learning.max_weight = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_learning_validate_rejects_zero_save_interval() {
        let config = LearningConfig {
            save_interval: 0,
            ..LearningConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig {
                field: "learning.save_interval",
                ..
            })
        ));
        assert!(LearningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("absent.json"));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(EngineConfig::load(&path), EngineConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("engine.json");
        let mut config = EngineConfig::default();
        config.search.depth = 3;
        config.learning.enabled = false;
        config.save(&path).unwrap();
        assert_eq!(EngineConfig::load(&path), config);
    }
}
