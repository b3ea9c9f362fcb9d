//! A lane: one horizontal strip of road and the obstacles crossing it
//!
//! The lane owns spawning, gap enforcement and culling. Geometry is
//! self-correcting every tick, so nothing here can fail.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level_gen::{Direction, LaneConfig};
use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::assets::SkinPalette;
use crate::consts::{CULL_MARGIN, SPAWN_OFFSET};

/// Candidate positions sampled when seeding a lane
pub const SEED_CANDIDATES: usize = 40;
/// Obstacles placed on a freshly reset lane (inclusive range)
pub const SEED_MIN: usize = 1;
pub const SEED_MAX: usize = 3;

/// Car body relative to lane height; cars are a little taller than the lane
pub const CAR_HEIGHT_RATIO: f32 = 1.15;
pub const CAR_MIN_HEIGHT: f32 = 26.0;
/// Length-to-height ratio of the top-view car sprites
pub const CAR_ASPECT: f32 = 1.49;
pub const CAR_MIN_WIDTH: f32 = 90.0;

/// Obstacle size for a lane of the given height
pub fn car_size(lane_height: f32) -> (f32, f32) {
    let h = (lane_height * CAR_HEIGHT_RATIO).floor().max(CAR_MIN_HEIGHT);
    let w = (h * CAR_ASPECT).floor().max(CAR_MIN_WIDTH);
    (w, h)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    /// Full-width strip this lane occupies
    pub rect: Rect,
    pub direction: Direction,
    pub speed: f32,
    pub spawn_every: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub min_gap: f32,
    /// Sorted by ascending x after every tick
    pub(crate) obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    next_id: u32,
}

impl Lane {
    /// Lane in `rect` with car-shaped obstacles sized from the strip height
    pub fn from_config(config: &LaneConfig, rect: Rect) -> Self {
        let (w, h) = car_size(rect.h);
        Self::new(
            rect,
            config.direction,
            config.speed,
            config.spawn_every,
            w,
            h,
            config.gap_min,
        )
    }

    pub fn new(
        rect: Rect,
        direction: Direction,
        speed: f32,
        spawn_every: f32,
        obstacle_width: f32,
        obstacle_height: f32,
        min_gap: f32,
    ) -> Self {
        Self {
            rect,
            direction,
            speed,
            spawn_every,
            obstacle_width,
            obstacle_height,
            min_gap,
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Top edge of obstacles in this lane. Cars are centred on the strip
    /// with both halves rounded down to whole pixels.
    fn obstacle_y(&self) -> f32 {
        self.rect.top() + (self.rect.h / 2.0).floor() - (self.obstacle_height / 2.0).floor()
    }

    fn make_obstacle<R: Rng + ?Sized>(&mut self, x: f32, rng: &mut R, skins: &SkinPalette) -> Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        let rect = Rect::new(x, self.obstacle_y(), self.obstacle_width, self.obstacle_height);
        Obstacle::new(id, rect, self.speed, self.direction, skins.pick(rng))
    }

    /// Clear the lane and seed it with 1-3 well-spaced obstacles
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, skins: &SkinPalette) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;

        let seed_count = rng.random_range(SEED_MIN..=SEED_MAX);
        let max_x = (self.rect.w - self.obstacle_width).max(0.0);

        let mut candidates: Vec<f32> = (0..SEED_CANDIDATES)
            .map(|_| rng.random_range(0.0..=max_x))
            .collect();
        candidates.sort_by(|a, b| a.total_cmp(b));

        let mut placed: Vec<f32> = Vec::with_capacity(seed_count);
        for x in candidates {
            if placed.len() >= seed_count {
                break;
            }
            let left = x;
            let right = x + self.obstacle_width;
            let clear = placed.iter().all(|&p| {
                let p_right = p + self.obstacle_width;
                right + self.min_gap <= p || left >= p_right + self.min_gap
            });
            if clear {
                placed.push(x);
            }
        }

        for x in placed {
            let obstacle = self.make_obstacle(x, rng, skins);
            self.obstacles.push(obstacle);
        }
        self.sort_obstacles();

        log::debug!(
            "Lane at y={} seeded with {} obstacles",
            self.rect.y,
            self.obstacles.len()
        );
    }

    fn sort_obstacles(&mut self) {
        self.obstacles.sort_by(|a, b| a.rect.x.total_cmp(&b.rect.x));
    }

    /// x where a new obstacle would enter, just off the screen edge behind
    /// the direction of travel
    pub fn entry_x(&self, playfield_width: f32) -> f32 {
        match self.direction {
            Direction::Right => -self.obstacle_width - SPAWN_OFFSET,
            Direction::Left => playfield_width + SPAWN_OFFSET,
        }
    }

    /// Obstacle closest to the entry point (the last one in the queue)
    fn rearmost(&self) -> Option<&Obstacle> {
        match self.direction {
            Direction::Right => self
                .obstacles
                .iter()
                .min_by(|a, b| a.rect.left().total_cmp(&b.rect.left())),
            Direction::Left => self
                .obstacles
                .iter()
                .max_by(|a, b| a.rect.right().total_cmp(&b.rect.right())),
        }
    }

    /// Whether the entry point is at least `min_gap` clear of every obstacle
    pub fn can_spawn(&self, playfield_width: f32) -> bool {
        let spawn_x = self.entry_x(playfield_width);
        match self.rearmost() {
            None => true,
            Some(nearest) => match self.direction {
                Direction::Right => nearest.rect.left() - spawn_x >= self.min_gap,
                Direction::Left => spawn_x - nearest.rect.right() >= self.min_gap,
            },
        }
    }

    /// Left edge for a newly spawned obstacle: the entry point, pushed further
    /// back if the rearmost obstacle would otherwise be within `min_gap`
    fn spawn_x(&self, playfield_width: f32) -> f32 {
        let base = self.entry_x(playfield_width);
        match (self.rearmost(), self.direction) {
            (None, _) => base,
            (Some(nearest), Direction::Right) => {
                base.min(nearest.rect.left() - self.min_gap - self.obstacle_width)
            }
            (Some(nearest), Direction::Left) => base.max(nearest.rect.right() + self.min_gap),
        }
    }

    /// Spawn one obstacle at the entry point if allowed; returns whether it did
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        playfield_width: f32,
        rng: &mut R,
        skins: &SkinPalette,
    ) -> bool {
        if !self.can_spawn(playfield_width) {
            return false;
        }
        let x = self.spawn_x(playfield_width);
        let obstacle = self.make_obstacle(x, rng, skins);
        log::debug!("Spawned obstacle {} at x={:.1}", obstacle.id, x);
        self.obstacles.push(obstacle);
        self.sort_obstacles();
        true
    }

    /// Push trailing obstacles back so each stays `min_gap` behind the one
    /// ahead of it. Positions are recomputed, not nudged in place.
    fn enforce_gaps(&mut self) {
        if self.obstacles.len() < 2 {
            return;
        }
        self.sort_obstacles();

        let gap = self.min_gap;
        match self.direction {
            Direction::Right => {
                // Rightmost leads; walk leftwards
                for i in (0..self.obstacles.len() - 1).rev() {
                    let limit = self.obstacles[i + 1].rect.left() - gap;
                    let back = self.obstacles[i].rect;
                    if back.right() > limit {
                        self.obstacles[i].rect = back.with_right(limit);
                    }
                }
            }
            Direction::Left => {
                // Leftmost leads; walk rightwards
                for i in 1..self.obstacles.len() {
                    let limit = self.obstacles[i - 1].rect.right() + gap;
                    let back = self.obstacles[i].rect;
                    if back.left() < limit {
                        self.obstacles[i].rect = back.with_left(limit);
                    }
                }
            }
        }
    }

    /// Drop obstacles that left the screen by more than the cull margin
    fn cull(&mut self, playfield_width: f32) {
        let before = self.obstacles.len();
        match self.direction {
            Direction::Right => self
                .obstacles
                .retain(|o| o.rect.left() < playfield_width + CULL_MARGIN),
            Direction::Left => self.obstacles.retain(|o| o.rect.right() > -CULL_MARGIN),
        }
        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::debug!("Culled {} obstacles from lane at y={}", culled, self.rect.y);
        }
    }

    /// Advance one frame: move, restore gaps, cull, then maybe spawn
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        playfield_width: f32,
        rng: &mut R,
        skins: &SkinPalette,
    ) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt);
        }

        self.enforce_gaps();
        self.cull(playfield_width);

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_every {
            self.spawn_timer = 0.0;
            self.try_spawn(playfield_width, rng, skins);
        }
    }
}
