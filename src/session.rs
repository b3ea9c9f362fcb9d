//! Screen flow around the simulation
//!
//! Home -> Playing -> Win/Lose -> (retry | next level | home). The session
//! owns the level list and the live `Level`; a renderer only reads from it and
//! feeds it input. One `Level` is built for the first attempt and restarted
//! with the chosen config for every later one.

use glam::Vec2;

use crate::assets::{AssetCache, AssetState, SkinPalette};
use crate::sim::{Level, LevelConfig, LevelEvent, Step, level_gen};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Playing,
    Win,
    Lose,
}

/// Non-movement keys handled while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Abandon the attempt and return home
    Escape,
    /// Start the current level over
    Restart,
}

/// Sound the presentation layer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Win,
    Hit,
}

impl SoundCue {
    /// Cached sound for this cue; an unavailable sound is simply not played
    pub fn asset<'a, T>(&self, cache: &'a AssetCache<T>) -> &'a AssetState<T> {
        match self {
            SoundCue::Win => &cache.win_sound,
            SoundCue::Hit => &cache.hit_sound,
        }
    }
}

pub struct Session {
    levels: Vec<LevelConfig>,
    level_index: usize,
    level: Option<Level>,
    screen: Screen,
    screen_size: Vec2,
    seed: u64,
    attempts: u64,
    skins: SkinPalette,
}

impl Session {
    /// An empty level list falls back to the default levels
    pub fn new(
        levels: Vec<LevelConfig>,
        screen_width: f32,
        screen_height: f32,
        seed: u64,
        skins: SkinPalette,
    ) -> Self {
        let levels = if levels.is_empty() {
            log::warn!("No levels configured, using defaults");
            level_gen::default_levels()
        } else {
            levels
        };
        Self {
            levels,
            level_index: 0,
            level: None,
            screen: Screen::Home,
            screen_size: Vec2::new(screen_width, screen_height),
            seed,
            attempts: 0,
            skins,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// The current (or last finished) attempt
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Attempts started since the session was created
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// New run from the first level
    pub fn start_run(&mut self) {
        self.start_level(0);
    }

    /// Start a fresh attempt at `index` (clamped to the level list)
    pub fn start_level(&mut self, index: usize) {
        self.level_index = index.min(self.levels.len() - 1);
        self.attempts += 1;

        let config = self.levels[self.level_index].clone();
        match self.level.as_mut() {
            // The level keeps its RNG stream, so every attempt gets a new layout
            Some(level) => level.restart(config),
            None => {
                let mut level = Level::new(
                    config,
                    self.screen_size.x,
                    self.screen_size.y,
                    self.seed,
                    self.skins,
                );
                level.start();
                self.level = Some(level);
            }
        }
        self.screen = Screen::Playing;
    }

    /// One frame of play. Ignored outside the Playing screen.
    ///
    /// Commands are handled before movement; returns the sounds to play.
    pub fn update(&mut self, dt: f32, commands: &[SessionCommand], steps: &[Step]) -> Vec<SoundCue> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }

        for command in commands {
            match command {
                SessionCommand::Escape => {
                    log::info!("Attempt abandoned");
                    self.screen = Screen::Home;
                    return Vec::new();
                }
                SessionCommand::Restart => self.start_level(self.level_index),
            }
        }

        let Some(level) = self.level.as_mut() else {
            return Vec::new();
        };

        match level.advance(dt, steps) {
            Some(LevelEvent::Won { .. }) => {
                self.screen = Screen::Win;
                vec![SoundCue::Win]
            }
            Some(LevelEvent::Lost { .. }) => {
                self.screen = Screen::Lose;
                vec![SoundCue::Hit]
            }
            None => Vec::new(),
        }
    }

    fn on_end_screen(&self) -> bool {
        matches!(self.screen, Screen::Win | Screen::Lose)
    }

    /// Whether "next level" is offered: only after a win, and only if one exists
    pub fn has_next(&self) -> bool {
        self.screen == Screen::Win && self.level_index + 1 < self.levels.len()
    }

    /// Replay the level just finished
    pub fn retry(&mut self) -> bool {
        if !self.on_end_screen() {
            return false;
        }
        self.start_level(self.level_index);
        true
    }

    /// Continue to the next level after a win
    pub fn next_level(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.start_level(self.level_index + 1);
        true
    }

    /// Back to the home screen from an end screen
    pub fn go_home(&mut self) -> bool {
        if !self.on_end_screen() {
            return false;
        }
        self.screen = Screen::Home;
        true
    }

    /// Stars for the finished attempt (0 unless the last attempt was won)
    pub fn stars(&self) -> u8 {
        self.level.as_ref().map(Level::stars_earned).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::sim::recognized_levels;

    fn session() -> Session {
        Session::new(
            recognized_levels(3),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            2024,
            SkinPalette::solid_only(),
        )
    }

    /// Drive the current level to a win with an empty road
    fn win_current(s: &mut Session) {
        for _ in 0..40 {
            if let Some(level) = s.level.as_mut() {
                for lane in level.lanes_mut() {
                    lane.obstacles.clear();
                }
            }
            let cues = s.update(0.1, &[], &[Step::Up]);
            if s.screen() == Screen::Win {
                assert_eq!(cues, vec![SoundCue::Win]);
                return;
            }
        }
        panic!("level was not won");
    }

    /// Force a loss by stepping straight into a parked car
    fn lose_current(s: &mut Session) {
        use crate::assets::Skin;
        use crate::sim::{Direction, Obstacle, Rect};

        let level = s.level.as_mut().expect("level running");
        let pos = level.player().pos;
        let lane = &mut level.lanes_mut()[0];
        lane.obstacles.clear();
        let rect = Rect::new(pos.x - 60.0, lane.rect.center().y - 40.0, 120.0, 80.0);
        lane.obstacles
            .push(Obstacle::new(900, rect, 0.0, Direction::Right, Skin::Solid([0, 0, 0])));

        let cues = s.update(0.1, &[], &[Step::Up]);
        assert_eq!(s.screen(), Screen::Lose);
        assert_eq!(cues, vec![SoundCue::Hit]);
    }

    #[test]
    fn test_starts_home() {
        let s = session();
        assert_eq!(s.screen(), Screen::Home);
        assert!(s.level().is_none());
        assert_eq!(s.stars(), 0);
    }

    #[test]
    fn test_update_ignored_at_home() {
        let mut s = session();
        assert!(s.update(0.1, &[], &[Step::Up]).is_empty());
        assert_eq!(s.screen(), Screen::Home);
    }

    #[test]
    fn test_start_run_plays_first_level() {
        let mut s = session();
        s.start_run();
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.level_index(), 0);
        assert!(s.level().is_some_and(Level::is_running));
    }

    #[test]
    fn test_start_level_clamps() {
        let mut s = session();
        s.start_level(99);
        assert_eq!(s.level_index(), 2);
    }

    #[test]
    fn test_escape_goes_home() {
        let mut s = session();
        s.start_run();
        s.update(0.1, &[SessionCommand::Escape], &[]);
        assert_eq!(s.screen(), Screen::Home);
    }

    #[test]
    fn test_restart_builds_fresh_attempt() {
        let mut s = session();
        s.start_run();
        s.update(0.5, &[], &[]);
        let attempts = s.attempts();
        s.update(0.1, &[SessionCommand::Restart], &[]);
        assert_eq!(s.attempts(), attempts + 1);
        assert_eq!(s.screen(), Screen::Playing);
        assert!((s.level().map(Level::elapsed).unwrap_or(0.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_win_unlocks_next_level() {
        let mut s = session();
        s.start_run();
        win_current(&mut s);
        assert!(s.has_next());
        assert!(s.stars() > 0);

        assert!(s.next_level());
        assert_eq!(s.level_index(), 1);
        assert_eq!(s.screen(), Screen::Playing);
        let level = s.level().expect("next level running");
        assert_eq!(level.config().name, "Level 2");
        assert_eq!(level.lanes().len(), 7);
        assert_eq!(level.elapsed(), 0.0);
    }

    #[test]
    fn test_attempts_reproducible_from_seed() {
        let layout = |s: &Session| -> Vec<Vec<f32>> {
            s.level()
                .map(|level| {
                    level
                        .lanes()
                        .iter()
                        .map(|lane| lane.obstacles().iter().map(|o| o.rect.x).collect())
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut a = session();
        let mut b = session();
        a.start_run();
        b.start_run();
        assert_eq!(layout(&a), layout(&b));

        a.update(0.1, &[SessionCommand::Restart], &[]);
        b.update(0.1, &[SessionCommand::Restart], &[]);
        assert_eq!(layout(&a), layout(&b));
        assert_eq!(a.attempts(), 2);
    }

    #[test]
    fn test_loss_offers_retry_but_not_next() {
        let mut s = session();
        s.start_run();
        lose_current(&mut s);
        assert!(!s.has_next());
        assert!(!s.next_level());
        assert_eq!(s.stars(), 0);

        assert!(s.retry());
        assert_eq!(s.level_index(), 0);
        assert_eq!(s.screen(), Screen::Playing);
    }

    #[test]
    fn test_last_level_has_no_next() {
        let mut s = session();
        s.start_level(2);
        win_current(&mut s);
        assert!(!s.has_next());
        assert!(s.go_home());
        assert_eq!(s.screen(), Screen::Home);
    }

    #[test]
    fn test_end_screen_actions_need_end_screen() {
        let mut s = session();
        assert!(!s.retry());
        assert!(!s.go_home());
        s.start_run();
        assert!(!s.retry());
        assert!(!s.next_level());
    }

    #[test]
    fn test_empty_level_list_uses_defaults() {
        let s = Session::new(Vec::new(), 900.0, 700.0, 1, SkinPalette::solid_only());
        assert_eq!(s.levels().len(), 5);
    }

    #[test]
    fn test_cue_assets() {
        let cache: AssetCache<()> = AssetCache::unavailable();
        assert!(!SoundCue::Win.asset(&cache).is_loaded());
        let cache = AssetCache::load_with(|path| {
            if path.ends_with("win.wav") {
                AssetState::Loaded(1u8)
            } else {
                AssetState::Unavailable
            }
        });
        assert!(SoundCue::Win.asset(&cache).is_loaded());
        assert!(!SoundCue::Hit.asset(&cache).is_loaded());
    }
}
