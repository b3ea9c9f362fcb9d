//! Asset cache for the presentation layer
//!
//! The cache is owned by whoever renders the game and is handed to the
//! simulation only as a `SkinPalette`. A missing or broken file never stops
//! the game: it becomes `AssetState::Unavailable` and the renderer draws a
//! solid-colour shape instead.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Top-view car sprites used for obstacles
pub const CAR_SPRITE_FILES: [&str; 4] = [
    "top-view-blue-car-outline-600nw-2582505797.png",
    "top-view-dark-grey-car-600nw-2582507361.png",
    "top-view-green-car-outline-600nw-2582506973.png",
    "top-view-white-car-outline-600nw-2582505535.png",
];
pub const PLAYER_SPRITE_FILE: &str = "Chicken.png";
pub const FINISH_BANNER_FILE: &str = "finish line.jpg";
pub const ROAD_TEXTURE_FILE: &str = "1.png";
pub const WIN_SOUND_FILE: &str = "win.wav";
pub const HIT_SOUND_FILE: &str = "hit.wav";

/// Obstacle colours used when no car sprite is available
pub const FALLBACK_COLORS: [[u8; 3]; 4] = [
    [255, 92, 92],
    [255, 165, 70],
    [255, 120, 210],
    [120, 255, 160],
];

/// Outcome of loading one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState<T> {
    Loaded(T),
    Unavailable,
}

impl<T> AssetState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, AssetState::Loaded(_))
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            AssetState::Loaded(asset) => Some(asset),
            AssetState::Unavailable => None,
        }
    }
}

/// How the renderer should draw one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Skin {
    /// Index into the loaded car sprites
    Sprite(usize),
    /// Solid rounded rectangle in this colour
    Solid([u8; 3]),
}

/// What the simulation needs to know about loaded assets: how many car
/// sprites it may pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinPalette {
    pub sprite_count: usize,
}

impl SkinPalette {
    /// Palette that only ever yields solid colours
    pub fn solid_only() -> Self {
        Self { sprite_count: 0 }
    }

    /// Random car sprite, or a random fallback colour when none loaded
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Skin {
        if self.sprite_count > 0 {
            Skin::Sprite(rng.random_range(0..self.sprite_count))
        } else {
            Skin::Solid(FALLBACK_COLORS[rng.random_range(0..FALLBACK_COLORS.len())])
        }
    }
}

/// All game assets, each either loaded or unavailable
#[derive(Debug, Clone)]
pub struct AssetCache<T> {
    pub cars: Vec<AssetState<T>>,
    pub player: AssetState<T>,
    pub finish_banner: AssetState<T>,
    pub road: AssetState<T>,
    pub win_sound: AssetState<T>,
    pub hit_sound: AssetState<T>,
}

impl<T> AssetCache<T> {
    /// Cache with nothing loaded; everything renders with fallbacks
    pub fn unavailable() -> Self {
        Self {
            cars: CAR_SPRITE_FILES
                .iter()
                .map(|_| AssetState::Unavailable)
                .collect(),
            player: AssetState::Unavailable,
            finish_banner: AssetState::Unavailable,
            road: AssetState::Unavailable,
            win_sound: AssetState::Unavailable,
            hit_sound: AssetState::Unavailable,
        }
    }

    /// Build the cache by asking `loader` for every known asset.
    ///
    /// The loader receives a path relative to the game root, e.g.
    /// `assets/Chicken.png` or `sounds/win.wav`.
    pub fn load_with<F>(mut loader: F) -> Self
    where
        F: FnMut(&str) -> AssetState<T>,
    {
        let mut image = |name: &str| loader(&format!("assets/{}", name));
        let cars = CAR_SPRITE_FILES.iter().map(|f| image(*f)).collect();
        let player = image(PLAYER_SPRITE_FILE);
        let finish_banner = image(FINISH_BANNER_FILE);
        let road = image(ROAD_TEXTURE_FILE);
        let win_sound = loader(&format!("sounds/{}", WIN_SOUND_FILE));
        let hit_sound = loader(&format!("sounds/{}", HIT_SOUND_FILE));

        Self {
            cars,
            player,
            finish_banner,
            road,
            win_sound,
            hit_sound,
        }
    }

    /// Loaded car sprites, in file order
    pub fn loaded_cars(&self) -> Vec<&T> {
        self.cars.iter().filter_map(AssetState::as_loaded).collect()
    }

    /// Car sprite for a `Skin::Sprite` index
    pub fn car_sprite(&self, index: usize) -> Option<&T> {
        self.loaded_cars().get(index).copied()
    }

    /// Skin choices exposed to the simulation.
    ///
    /// Car sprites are all-or-nothing: a partial set falls back to colours so
    /// the lanes look consistent.
    pub fn skin_palette(&self) -> SkinPalette {
        if self.cars.iter().all(AssetState::is_loaded) {
            SkinPalette {
                sprite_count: self.cars.len(),
            }
        } else {
            SkinPalette::solid_only()
        }
    }
}

impl AssetCache<Vec<u8>> {
    /// Read raw asset bytes from `root`; unreadable files become unavailable
    pub fn from_dir(root: &Path) -> Self {
        let cache = Self::load_with(|relative| {
            let path = root.join(relative);
            match std::fs::read(&path) {
                Ok(bytes) => AssetState::Loaded(bytes),
                Err(e) => {
                    log::warn!("Asset {} unavailable ({}), using fallback", path.display(), e);
                    AssetState::Unavailable
                }
            }
        });
        log::info!(
            "Loaded {}/{} car sprites from {}",
            cache.loaded_cars().len(),
            CAR_SPRITE_FILES.len(),
            root.display()
        );
        cache
    }
}
