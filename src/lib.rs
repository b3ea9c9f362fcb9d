//! Cross Road - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (levels, lanes, obstacles, player)
//! - `session`: Screen flow (home/playing/win/lose) and level progression
//! - `assets`: Asset cache with solid-colour fallbacks
//! - `autopilot`: Demo input policy for headless runs
//! - `settings`: Runtime configuration

pub mod assets;
pub mod autopilot;
pub mod session;
pub mod settings;
pub mod sim;

pub use assets::{AssetCache, AssetState, Skin, SkinPalette};
pub use autopilot::Autopilot;
pub use session::{Screen, Session, SessionCommand, SoundCue};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Frame delta at the target 60 FPS
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Difficulty indices understood by the level generator
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 10;
    /// Levels instantiated at startup
    pub const DEFAULT_LEVEL_COUNT: u32 = 5;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    /// Extra pixels around the radius-derived sprite box
    pub const PLAYER_SPRITE_PAD: f32 = 10.0;
    /// Fraction of the sprite box removed from the hitbox per axis
    pub const PLAYER_HITBOX_SHRINK_X: f32 = 0.28;
    pub const PLAYER_HITBOX_SHRINK_Y: f32 = 0.32;
    /// Smallest hitbox edge regardless of shrink
    pub const PLAYER_HITBOX_MIN: f32 = 8.0;
    /// Seconds between accepted step inputs
    pub const STEP_COOLDOWN: f32 = 0.09;

    /// Obstacle hitbox padding (total, split evenly between opposite sides)
    pub const OBSTACLE_PAD_RATIO_X: f32 = 0.16;
    pub const OBSTACLE_PAD_MIN_X: f32 = 6.0;
    pub const OBSTACLE_PAD_RATIO_Y: f32 = 0.20;
    pub const OBSTACLE_PAD_MIN_Y: f32 = 4.0;

    /// Distance past the screen edge before an obstacle is culled
    pub const CULL_MARGIN: f32 = 200.0;
    /// Distance outside the screen edge where obstacles enter
    pub const SPAWN_OFFSET: f32 = 20.0;

    /// Smallest gap the generator will ever emit
    pub const GAP_MIN_FLOOR: f32 = 95.0;
    /// Fastest spawn cadence the generator will ever emit (seconds)
    pub const SPAWN_EVERY_FLOOR: f32 = 0.55;
}

/// Clamp a difficulty index into the generator's recognised range
#[inline]
pub fn clamp_level_index(n: i32) -> u32 {
    n.clamp(consts::MIN_LEVEL as i32, consts::MAX_LEVEL as i32) as u32
}
