//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One `advance(dt)` per rendered frame
//! - Randomness only through an explicit, seeded RNG
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod lane;
pub mod level;
pub mod level_gen;
pub mod obstacle;
pub mod player;
pub mod rect;

pub use collision::{obstacle_hitbox, player_hits_obstacle};
pub use lane::Lane;
pub use level::{Level, LevelEvent, LevelPhase};
pub use level_gen::{
    Direction, LaneConfig, LevelConfig, StarTimes, default_levels, generate, recognized_levels,
};
pub use obstacle::Obstacle;
pub use player::{Player, Step};
pub use rect::Rect;
