//! Procedural level generation
//!
//! Every level is derived from a single difficulty index in 1..=10.
//! Difficulty rises through more lanes, faster obstacles, quicker spawns,
//! slightly tighter gaps and stricter star thresholds.

use serde::{Deserialize, Serialize};

use crate::clamp_level_index;
use crate::consts::{DEFAULT_LEVEL_COUNT, GAP_MIN_FLOOR, MAX_LEVEL, SPAWN_EVERY_FLOOR};

/// Travel direction of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards +x
    Right,
    /// Towards -x
    Left,
}

impl Direction {
    /// +1.0 for `Right`, -1.0 for `Left`
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }

    /// Any non-negative value maps to `Right`
    pub fn from_sign(sign: i32) -> Self {
        if sign >= 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Completion-time thresholds (seconds) for the star rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarTimes {
    /// At or under this time: 3 stars
    pub three: f32,
    /// At or under this time: 2 stars, above it: 1 star
    pub two: f32,
}

impl StarTimes {
    /// Rating for a completed run; callers only ask when the level was won
    pub fn rate(&self, elapsed: f32) -> u8 {
        if elapsed <= self.three {
            3
        } else if elapsed <= self.two {
            2
        } else {
            1
        }
    }
}

/// Tuning for a single lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub direction: Direction,
    /// Obstacle speed (pixels/s)
    pub speed: f32,
    /// Seconds between spawn attempts
    pub spawn_every: f32,
    pub obstacle_width: f32,
    /// Minimum spacing between neighbouring obstacles (pixels)
    pub gap_min: f32,
}

/// Complete description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    /// Difficulty index this config was generated from
    pub index: u32,
    pub lane_count: u32,
    pub lane_height: f32,
    pub finish_padding: f32,
    pub player_step: f32,
    /// Reserved for continuous movement; step movement ignores it
    pub player_speed: f32,
    pub star_times: StarTimes,
    /// Bottom-most lane first
    pub lanes: Vec<LaneConfig>,
}

/// Generate the level for a difficulty index (clamped to 1..=10)
pub fn generate(level: i32) -> LevelConfig {
    let n = clamp_level_index(level);
    let k = (n - 1) as f32;

    let lane_height = 70 - (n - 1);
    let lane_count = 5 + n;

    // Later levels expect faster completion
    let three = (13.0 - k * 0.4).max(8.0);
    let two = (20.0 - k * 0.45).max(12.0);

    let lanes = (0..lane_count)
        .map(|i| lane_config(n, i))
        .collect::<Vec<_>>();

    LevelConfig {
        name: format!("Level {}", n),
        index: n,
        lane_count,
        lane_height: lane_height as f32,
        finish_padding: 32u32.saturating_sub(n).max(22) as f32,
        player_step: lane_height as f32,
        player_speed: (420 + (n - 1) * 10) as f32,
        star_times: StarTimes { three, two },
        lanes,
    }
}

fn lane_config(n: u32, i: u32) -> LaneConfig {
    let k = (n - 1) as i32;
    let i = i as i32;

    let direction = if i % 2 == 0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let speed = 170 + k * 28 + i * 6;
    let spawn_every = (1.25 - k as f32 * 0.06 - i as f32 * 0.01).max(SPAWN_EVERY_FLOOR);
    let obstacle_width = (120 - k * 3).clamp(70, 130);
    let gap_min = (165 - k * 6 - i).max(GAP_MIN_FLOOR as i32);

    LaneConfig {
        direction,
        speed: speed as f32,
        spawn_every,
        obstacle_width: obstacle_width as f32,
        gap_min: gap_min as f32,
    }
}

/// The levels offered at startup: indices `1..=count`, count clamped to 1..=10
pub fn recognized_levels(count: u32) -> Vec<LevelConfig> {
    let count = count.clamp(1, MAX_LEVEL);
    (1..=count as i32).map(generate).collect()
}

/// Startup level list with the default count
pub fn default_levels() -> Vec<LevelConfig> {
    recognized_levels(DEFAULT_LEVEL_COUNT)
}
