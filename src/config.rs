//! Game configuration. Loaded from `config.ron` at startup.
//!
//! `Rules` holds the gameplay knobs that travel with the world; the rest of
//! `GameConfig` only concerns the terminal host.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spawner::SPAWN_FLOOR_MS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid rule `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Gameplay tunables. Fixed tables (damage, score, fire patterns) are not
/// here on purpose; they live next to the code that applies them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Player speed in units per reference frame.
    pub player_speed: f32,
    /// Probability that a spawned enemy is a plane rather than an asteroid.
    pub plane_ratio: f64,
    pub spawn_base_interval_ms: f32,
    pub spawn_min_interval_ms: f32,
    /// Milliseconds shaved off the spawn interval per point of score.
    pub spawn_score_factor: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Extra enemy speed per unit of difficulty.
    pub enemy_speed_difficulty_scale: f32,
    pub star_count: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            playfield_width: 800.0,
            playfield_height: 600.0,
            player_speed: 5.0,
            plane_ratio: 0.5,
            spawn_base_interval_ms: 1000.0,
            spawn_min_interval_ms: SPAWN_FLOOR_MS,
            spawn_score_factor: 0.1,
            enemy_speed_min: 1.0,
            enemy_speed_max: 3.0,
            enemy_speed_difficulty_scale: 0.5,
            star_count: 100,
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.playfield_width > 0.0) || !(self.playfield_height > 0.0) {
            return Err(invalid("playfield", "width and height must be positive"));
        }
        if !(self.player_speed >= 0.0) {
            return Err(invalid("player_speed", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.plane_ratio) {
            return Err(invalid("plane_ratio", "must lie in [0, 1]"));
        }
        if !(self.spawn_min_interval_ms >= SPAWN_FLOOR_MS) {
            return Err(invalid(
                "spawn_min_interval_ms",
                format!("must be at least {SPAWN_FLOOR_MS} ms"),
            ));
        }
        if !(self.spawn_base_interval_ms >= self.spawn_min_interval_ms) {
            return Err(invalid(
                "spawn_base_interval_ms",
                "must not be below spawn_min_interval_ms",
            ));
        }
        if !(self.spawn_score_factor >= 0.0) {
            return Err(invalid("spawn_score_factor", "must not be negative"));
        }
        if !(self.enemy_speed_min >= 0.0 && self.enemy_speed_min < self.enemy_speed_max) {
            return Err(invalid(
                "enemy_speed_min",
                "speed range must be non-empty and non-negative",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Host settings plus the gameplay rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Target frame duration of the terminal loop.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Where the binary writes its log (the terminal is in raw mode).
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Ring the terminal bell on hits and explosions.
    #[serde(default = "default_true")]
    pub bell: bool,
    #[serde(default)]
    pub rules: Rules,
}

fn default_frame_ms() -> u64 {
    16
}
fn default_log_file() -> PathBuf {
    PathBuf::from("plane_battle.log")
}
fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            log_file: default_log_file(),
            bell: default_true(),
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.rules.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data)
    }

    /// Load `config.ron` from the working directory; defaults when there
    /// is no such file.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(&path)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}
