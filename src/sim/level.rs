//! A level session: player + lanes, elapsed time, win/loss and stars
//!
//! Layout from the bottom of the screen: a safe zone one lane tall (where the
//! player spawns), then the road lanes, then the finish zone above the
//! finish line.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::player_hits_obstacle;
use super::lane::Lane;
use super::level_gen::LevelConfig;
use super::player::{Player, Step};
use super::rect::Rect;
use crate::assets::SkinPalette;

/// Lifecycle of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Built but `start` not called yet
    NotStarted,
    Running,
    /// Player reached the finish line
    Won,
    /// Player was hit
    Lost,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LevelEvent {
    Won { elapsed: f32, stars: u8 },
    Lost { elapsed: f32 },
}

#[derive(Debug, Clone)]
pub struct Level {
    config: LevelConfig,
    screen: Vec2,
    safe_zone_height: f32,
    lanes: Vec<Lane>,
    player: Player,
    elapsed: f32,
    phase: LevelPhase,
    rng: Pcg32,
    skins: SkinPalette,
}

impl Level {
    /// Build a session for `config` on a `screen_width` x `screen_height`
    /// playfield. Obstacle placement draws from a generator seeded by `seed`.
    pub fn new(
        config: LevelConfig,
        screen_width: f32,
        screen_height: f32,
        seed: u64,
        skins: SkinPalette,
    ) -> Self {
        let screen = Vec2::new(screen_width, screen_height);
        let (lanes, player, safe_zone_height) = Self::layout(&config, screen);
        Self {
            config,
            screen,
            safe_zone_height,
            lanes,
            player,
            elapsed: 0.0,
            phase: LevelPhase::NotStarted,
            rng: Pcg32::seed_from_u64(seed),
            skins,
        }
    }

    fn layout(config: &LevelConfig, screen: Vec2) -> (Vec<Lane>, Player, f32) {
        let lane_height = config.lane_height;
        let safe_zone_height = lane_height;

        // Lane 0 sits directly above the bottom safe zone
        let lanes = config
            .lanes
            .iter()
            .enumerate()
            .map(|(i, lane_cfg)| {
                let top = screen.y - safe_zone_height - (i as f32 + 1.0) * lane_height;
                Lane::from_config(lane_cfg, Rect::new(0.0, top, screen.x, lane_height))
            })
            .collect();

        let start = Vec2::new(
            (screen.x / 2.0).floor(),
            screen.y - (safe_zone_height / 2.0).floor(),
        );
        let player = Player::new(
            start,
            config.player_step,
            config.player_speed,
            Rect::new(0.0, 0.0, screen.x, screen.y),
        );

        (lanes, player, safe_zone_height)
    }

    /// Begin (or re-begin) the attempt: fresh player, reseeded lanes, clock at 0
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.phase = LevelPhase::Running;
        self.player.reset_to_start();
        for lane in &mut self.lanes {
            lane.reset(&mut self.rng, &self.skins);
        }
        log::info!(
            "{} started: {} lanes, finish line at y={}",
            self.config.name,
            self.lanes.len(),
            self.finish_line_y()
        );
        if !self.finish_reachable() {
            log::warn!(
                "{}: finish line y={} is above the highest reachable point on a {}px playfield",
                self.config.name,
                self.finish_line_y(),
                self.screen.y
            );
        }
    }

    /// Replace the level with another config on the same playfield and start it
    pub fn restart(&mut self, config: LevelConfig) {
        let (lanes, player, safe_zone_height) = Self::layout(&config, self.screen);
        self.config = config;
        self.lanes = lanes;
        self.player = player;
        self.safe_zone_height = safe_zone_height;
        self.start();
    }

    /// Advance one frame. No-op unless running.
    ///
    /// Returns the outcome event if the level was won or lost this frame.
    pub fn advance(&mut self, dt: f32, steps: &[Step]) -> Option<LevelEvent> {
        if self.phase != LevelPhase::Running {
            return None;
        }

        self.elapsed += dt;
        self.player.advance(dt, steps);

        for lane in &mut self.lanes {
            lane.advance(dt, self.screen.x, &mut self.rng, &self.skins);
        }

        let hitbox = self.player.hitbox();
        let hit = self
            .lanes
            .iter()
            .flat_map(|lane| lane.obstacles())
            .any(|obstacle| player_hits_obstacle(&hitbox, obstacle));
        if hit {
            self.phase = LevelPhase::Lost;
            log::info!("{} lost after {:.2}s", self.config.name, self.elapsed);
            return Some(LevelEvent::Lost {
                elapsed: self.elapsed,
            });
        }

        if self.player.pos.y <= self.finish_line_y() {
            self.phase = LevelPhase::Won;
            let stars = self.stars_earned();
            log::info!(
                "{} won in {:.2}s ({} stars)",
                self.config.name,
                self.elapsed,
                stars
            );
            return Some(LevelEvent::Won {
                elapsed: self.elapsed,
                stars,
            });
        }

        None
    }

    /// Top edge of the road: reaching it wins the level
    pub fn finish_line_y(&self) -> f32 {
        self.screen.y - self.safe_zone_height - self.config.lane_count as f32 * self.config.lane_height
    }

    /// Whether the player can climb high enough to cross the finish line.
    ///
    /// Tall levels on a short playfield put the road top above the screen.
    pub fn finish_reachable(&self) -> bool {
        self.finish_line_y() >= self.player.bounds.top() + self.player.radius
    }

    /// 0 unless won; otherwise 1-3 from the elapsed time
    pub fn stars_earned(&self) -> u8 {
        if self.phase != LevelPhase::Won {
            return 0;
        }
        self.config.star_times.rate(self.elapsed)
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.phase == LevelPhase::Running
    }

    pub fn is_won(&self) -> bool {
        self.phase == LevelPhase::Won
    }

    pub fn is_lost(&self) -> bool {
        self.phase == LevelPhase::Lost
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[cfg(test)]
    pub(crate) fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen
    }

    pub fn safe_zone_height(&self) -> f32 {
        self.safe_zone_height
    }

    /// Lane whose strip contains screen height `y`, if any
    pub fn lane_at(&self, y: f32) -> Option<&Lane> {
        self.lanes
            .iter()
            .find(|lane| y >= lane.rect.top() && y < lane.rect.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Skin;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::sim::level_gen::{Direction, StarTimes, generate};
    use crate::sim::obstacle::Obstacle;

    fn level(n: i32, seed: u64) -> Level {
        Level::new(
            generate(n),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            seed,
            SkinPalette::solid_only(),
        )
    }

    fn clear_lanes(level: &mut Level) {
        for lane in &mut level.lanes {
            lane.obstacles.clear();
        }
    }

    #[test]
    fn test_layout_level_one() {
        let l = level(1, 1);
        assert_eq!(l.lanes().len(), 6);
        assert_eq!(l.safe_zone_height(), 70.0);
        assert_eq!(l.lanes()[0].rect, Rect::new(0.0, 560.0, 900.0, 70.0));
        assert_eq!(l.lanes()[5].rect.top(), 210.0);
        assert_eq!(l.finish_line_y(), 210.0);
        assert_eq!(l.player().start, Vec2::new(450.0, 665.0));
        assert_eq!(l.lanes()[1].direction, Direction::Left);
    }

    #[test]
    fn test_advance_before_start_is_noop() {
        let mut l = level(1, 1);
        assert_eq!(l.phase(), LevelPhase::NotStarted);
        assert_eq!(l.advance(0.5, &[Step::Up]), None);
        assert_eq!(l.elapsed(), 0.0);
        assert_eq!(l.player().pos, l.player().start);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut l = level(2, 3);
        l.start();
        assert!(l.is_running());
        for lane in l.lanes() {
            assert!(!lane.obstacles().is_empty());
        }
        l.advance(0.1, &[Step::Up]);
        assert!(l.elapsed() > 0.0);

        l.start();
        assert_eq!(l.elapsed(), 0.0);
        assert_eq!(l.player().pos, l.player().start);
        assert!(l.player().can_step());
    }

    #[test]
    fn test_stars_thresholds() {
        let mut l = level(1, 1);
        l.config.star_times = StarTimes {
            three: 10.0,
            two: 15.0,
        };

        for (elapsed, expected) in [(9.0, 3), (12.0, 2), (20.0, 1)] {
            l.phase = LevelPhase::Won;
            l.elapsed = elapsed;
            assert_eq!(l.stars_earned(), expected, "elapsed {}", elapsed);
        }

        for phase in [LevelPhase::NotStarted, LevelPhase::Running, LevelPhase::Lost] {
            l.phase = phase;
            l.elapsed = 1.0;
            assert_eq!(l.stars_earned(), 0);
        }
    }

    #[test]
    fn test_idle_run_culls_seeded_obstacles() {
        let mut l = level(1, 42);
        l.start();
        let seeded: Vec<(usize, u32)> = l
            .lanes()
            .iter()
            .enumerate()
            .flat_map(|(i, lane)| lane.obstacles().iter().map(move |o| (i, o.id)))
            .collect();
        assert!(!seeded.is_empty());

        for _ in 0..200 {
            l.advance(0.1, &[]);
        }

        // Player never left the safe zone, so nothing could hit it
        assert!(l.is_running());
        assert!((l.elapsed() - 20.0).abs() < 1e-3);

        for (i, id) in seeded {
            assert!(
                l.lanes()[i].obstacles().iter().all(|o| o.id != id),
                "seeded obstacle {} in lane {} was never culled",
                id,
                i
            );
        }
        for lane in l.lanes() {
            for o in lane.obstacles() {
                match lane.direction {
                    Direction::Right => assert!(o.rect.left() < SCREEN_WIDTH + 200.0),
                    Direction::Left => assert!(o.rect.right() > -200.0),
                }
            }
        }
    }

    #[test]
    fn test_collision_loses_and_stays_lost() {
        let mut l = level(1, 7);
        l.start();
        clear_lanes(&mut l);

        // Parked car right on top of the player
        let lane = &mut l.lanes[0];
        let rect = Rect::from_center(l.player.pos, lane.obstacle_width, lane.obstacle_height);
        lane.obstacles.push(Obstacle::new(
            999,
            rect,
            0.0,
            Direction::Right,
            Skin::Solid([255, 0, 0]),
        ));

        let event = l.advance(0.01, &[]);
        assert_eq!(event, Some(LevelEvent::Lost { elapsed: 0.01 }));
        assert!(l.is_lost());
        assert!(!l.is_won());
        assert_eq!(l.stars_earned(), 0);

        let elapsed = l.elapsed();
        let pos = l.player().pos;
        for _ in 0..10 {
            assert_eq!(l.advance(0.5, &[Step::Up]), None);
        }
        assert!(l.is_lost());
        assert!(!l.is_won());
        assert_eq!(l.elapsed(), elapsed);
        assert_eq!(l.player().pos, pos);
    }

    #[test]
    fn test_win_when_crossing_finish_line() {
        let mut l = level(1, 9);
        l.start();
        let finish = l.finish_line_y();

        let mut ticks = 0;
        while !l.is_won() {
            clear_lanes(&mut l);
            let event = l.advance(0.1, &[Step::Up]);
            ticks += 1;
            assert!(!l.is_lost());

            let y = l.player().pos.y;
            assert_eq!(l.is_won(), y <= finish, "y={} finish={}", y, finish);
            if l.is_won() {
                assert!(matches!(event, Some(LevelEvent::Won { .. })));
            }
            assert!(ticks < 20, "never reached the finish line");
        }

        // 665 -> 175 in seven steps of 70; 245 is still short of 210
        assert_eq!(ticks, 7);
        assert_eq!(l.player().pos.y, 175.0);
        assert_eq!(l.stars_earned(), 3);

        let elapsed = l.elapsed();
        l.advance(100.0, &[Step::Down]);
        assert!(l.is_won());
        assert!(!l.is_lost());
        assert_eq!(l.elapsed(), elapsed);
        assert_eq!(l.stars_earned(), 3);
    }

    #[test]
    fn test_win_when_landing_on_finish_line() {
        let mut l = level(1, 11);
        l.start();
        let finish = l.finish_line_y();
        let step = l.player().step;
        l.player.pos.y = finish + 2.0 * step;

        clear_lanes(&mut l);
        assert_eq!(l.advance(0.1, &[Step::Up]), None);
        assert_eq!(l.player().pos.y, finish + step);
        assert!(l.is_running());

        clear_lanes(&mut l);
        let event = l.advance(0.1, &[Step::Up]);
        assert_eq!(l.player().pos.y, finish);
        assert!(l.is_won());
        assert!(matches!(event, Some(LevelEvent::Won { .. })));
    }

    #[test]
    fn test_restart_switches_config() {
        let mut l = level(1, 5);
        l.start();
        l.advance(0.2, &[]);

        l.restart(generate(3));
        assert!(l.is_running());
        assert_eq!(l.config().name, "Level 3");
        assert_eq!(l.lanes().len(), 8);
        assert_eq!(l.elapsed(), 0.0);
        assert_eq!(l.finish_line_y(), 700.0 - 68.0 - 8.0 * 68.0);
        assert_eq!(l.player().step, 68.0);
    }

    #[test]
    fn test_same_seed_same_lanes() {
        let mut a = level(4, 1234);
        let mut b = level(4, 1234);
        a.start();
        b.start();
        for _ in 0..120 {
            a.advance(1.0 / 60.0, &[]);
            b.advance(1.0 / 60.0, &[]);
        }
        for (la, lb) in a.lanes().iter().zip(b.lanes()) {
            let xa: Vec<f32> = la.obstacles().iter().map(|o| o.rect.x).collect();
            let xb: Vec<f32> = lb.obstacles().iter().map(|o| o.rect.x).collect();
            assert_eq!(xa, xb);
        }
    }

    #[test]
    fn test_finish_reachability() {
        assert!(level(4, 1).finish_reachable());
        // 10 lanes of 66px plus the safe zone overflow a 700px screen
        assert!(!level(5, 1).finish_reachable());
        let tall = Level::new(generate(5), SCREEN_WIDTH, 800.0, 1, SkinPalette::solid_only());
        assert!(tall.finish_reachable());
    }

    #[test]
    fn test_lane_at() {
        let l = level(1, 1);
        assert_eq!(l.lane_at(600.0).map(|lane| lane.rect.top()), Some(560.0));
        assert!(l.lane_at(665.0).is_none());
        assert!(l.lane_at(100.0).is_none());
    }
}
