//! Runtime settings
//!
//! Read from an optional JSON file. Missing fields take their defaults; a
//! missing or unreadable file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{LevelConfig, recognized_levels};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Levels ===
    /// How many generated levels are offered (1-10)
    pub level_count: u32,
    /// Fixed seed for obstacle layouts; random per run when unset
    pub seed: Option<u64>,

    // === Headless runner ===
    /// Simulation step per frame (seconds)
    pub frame_dt: f32,
    /// Give up on an attempt after this many simulated seconds
    pub max_run_seconds: f32,
    /// Attempts per level before the runner stops
    pub max_attempts: u32,

    // === Assets ===
    /// Game root holding `assets/` and `sounds/`; fallbacks only when unset
    pub asset_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            level_count: DEFAULT_LEVEL_COUNT,
            seed: None,
            frame_dt: FRAME_DT,
            max_run_seconds: 60.0,
            max_attempts: 3,
            asset_dir: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, repairing out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.level_count = self.level_count.clamp(MIN_LEVEL, MAX_LEVEL);

        // Room for the player body, and for the safe zone plus one lane
        let body = PLAYER_RADIUS * 2.0 + PLAYER_SPRITE_PAD;
        let tallest_lane = self
            .levels()
            .iter()
            .map(|level| level.lane_height)
            .fold(0.0, f32::max);
        self.screen_width = positive_or(self.screen_width, defaults.screen_width).max(body);
        let min_height = (tallest_lane * 2.0).max(body);
        self.screen_height = positive_or(self.screen_height, defaults.screen_height).max(min_height);
        // Large frames would let obstacles tunnel through the player
        self.frame_dt = positive_or(self.frame_dt, defaults.frame_dt).min(0.1);
        self.max_run_seconds = positive_or(self.max_run_seconds, defaults.max_run_seconds);
        self.max_attempts = self.max_attempts.max(1);
        self
    }

    /// The level list these settings offer
    pub fn levels(&self) -> Vec<LevelConfig> {
        recognized_levels(self.level_count)
    }
}

/// `value` if it is a positive number, else `fallback` (also catches NaN)
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 { value } else { fallback }
}
