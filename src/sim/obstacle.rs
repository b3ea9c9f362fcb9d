//! A single moving obstacle (a car crossing its lane)

use serde::{Deserialize, Serialize};

use super::level_gen::Direction;
use super::rect::Rect;
use crate::assets::Skin;

/// One moving rectangle hazard, owned by its lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique within its lane for the lifetime of a level session
    pub id: u32,
    pub rect: Rect,
    /// Pixels per second along `direction`
    pub speed: f32,
    pub direction: Direction,
    /// Presentation hint only; the simulation never reads it
    pub skin: Skin,
}

impl Obstacle {
    pub fn new(id: u32, rect: Rect, speed: f32, direction: Direction, skin: Skin) -> Self {
        Self {
            id,
            rect,
            speed,
            direction,
            skin,
        }
    }

    /// Move along the lane. Culling is the lane's job.
    pub fn advance(&mut self, dt: f32) {
        self.rect = self.rect.shifted_x(self.direction.sign() * self.speed * dt);
    }

    /// Edge that leads in the direction of travel
    pub fn leading_edge(&self) -> f32 {
        match self.direction {
            Direction::Right => self.rect.right(),
            Direction::Left => self.rect.left(),
        }
    }

    /// Edge that trails behind in the direction of travel
    pub fn trailing_edge(&self) -> f32 {
        match self.direction {
            Direction::Right => self.rect.left(),
            Direction::Left => self.rect.right(),
        }
    }
}
