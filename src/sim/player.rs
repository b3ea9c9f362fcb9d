//! The player: discrete step movement with a short input cooldown

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Cooldown left over from summing frame deltas in f32 counts as elapsed
const COOLDOWN_EPSILON: f32 = 1e-6;

/// One discrete directional press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

impl Step {
    /// Displacement for a step of `size` pixels (screen y grows down)
    pub fn delta(self, size: f32) -> Vec2 {
        match self {
            Step::Up => Vec2::new(0.0, -size),
            Step::Down => Vec2::new(0.0, size),
            Step::Left => Vec2::new(-size, 0.0),
            Step::Right => Vec2::new(size, 0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Spawn point, restored on reset
    pub start: Vec2,
    /// Centre of the player
    pub pos: Vec2,
    /// Pixels moved per accepted press
    pub step: f32,
    /// Reserved for continuous movement; step movement ignores it
    pub speed: f32,
    /// Radius of the visual body; the centre is kept this far inside bounds
    pub radius: f32,
    /// Playfield the player may not leave
    pub bounds: Rect,
    /// Seconds until the next press is accepted
    cooldown: f32,
}

impl Player {
    pub fn new(start: Vec2, step: f32, speed: f32, bounds: Rect) -> Self {
        Self {
            start,
            pos: start,
            step,
            speed,
            radius: PLAYER_RADIUS,
            bounds,
            cooldown: 0.0,
        }
    }

    /// Back to the spawn point with input ready
    pub fn reset_to_start(&mut self) {
        self.pos = self.start;
        self.cooldown = 0.0;
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Whether a press this frame would be accepted
    pub fn can_step(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Apply this frame's presses (in order), then clamp to bounds.
    ///
    /// At most one press is accepted while the cooldown is clear; it re-arms
    /// the cooldown, so later presses in the same frame are dropped.
    pub fn advance(&mut self, dt: f32, steps: &[Step]) {
        self.cooldown -= dt;
        if self.cooldown <= COOLDOWN_EPSILON {
            self.cooldown = 0.0;
        }

        for &step in steps {
            if self.cooldown <= 0.0 {
                self.pos += step.delta(self.step);
                self.cooldown = STEP_COOLDOWN;
            }
        }

        self.clamp_to_bounds();
    }

    /// Keep the centre `radius` inside the bounds. A playfield smaller than
    /// the body pins the centre to the far edge instead of panicking.
    fn clamp_to_bounds(&mut self) {
        let b = self.bounds;
        self.pos.x = self
            .pos
            .x
            .max(b.left() + self.radius)
            .min(b.right() - self.radius);
        self.pos.y = self
            .pos
            .y
            .max(b.top() + self.radius)
            .min(b.bottom() - self.radius);
    }

    /// Size of the drawn sprite box
    pub fn visual_size(&self) -> f32 {
        self.radius * 2.0 + PLAYER_SPRITE_PAD
    }

    /// Drawn sprite box, centred on the player
    pub fn visual_rect(&self) -> Rect {
        let size = self.visual_size();
        Rect::from_center(self.pos, size, size)
    }

    /// Collision box: the sprite box shrunk per axis so grazing contact
    /// around transparent sprite edges does not count
    pub fn hitbox(&self) -> Rect {
        let size = self.visual_size();
        let w = (size * (1.0 - PLAYER_HITBOX_SHRINK_X)).max(PLAYER_HITBOX_MIN);
        let h = (size * (1.0 - PLAYER_HITBOX_SHRINK_Y)).max(PLAYER_HITBOX_MIN);
        Rect::from_center(self.pos, w, h)
    }
}
