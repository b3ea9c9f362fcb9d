//! Idle/demo input policy
//!
//! Plays a level without a human: hop up when the slot above stays clear for
//! a short look-ahead, back off or sidestep when the current slot is about
//! to be hit, otherwise wait.

use crate::sim::{Level, Rect, Step, obstacle_hitbox};

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Seconds of obstacle travel treated as dangerous
    pub lookahead: f32,
    /// Extra horizontal clearance around swept obstacles (pixels)
    pub margin: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lookahead: 0.45,
            margin: 12.0,
        }
    }
}

impl Autopilot {
    /// Press to send this frame, if any
    pub fn choose(&self, level: &Level) -> Option<Step> {
        if !level.is_running() {
            return None;
        }
        let player = level.player();
        if !player.can_step() {
            return None;
        }

        let here = player.hitbox();
        let after = |step: Step| {
            let pos = player.pos + step.delta(player.step);
            Rect::from_center(pos, here.w, here.h)
        };

        if self.is_clear(level, &after(Step::Up)) {
            return Some(Step::Up);
        }
        if self.is_clear(level, &here) {
            return None;
        }

        // Current slot is about to be hit: back off first, then sidestep
        [Step::Down, Step::Left, Step::Right]
            .into_iter()
            .find(|&step| self.is_clear(level, &after(step)))
    }

    /// No obstacle sweeps through `slot` within the look-ahead window
    fn is_clear(&self, level: &Level, slot: &Rect) -> bool {
        level.lanes().iter().all(|lane| {
            lane.obstacles().iter().all(|o| {
                let now = obstacle_hitbox(&o.rect);
                let later = now.shifted_x(o.direction.sign() * o.speed * self.lookahead);
                let swept = now.union(&later).inflate(self.margin * 2.0, 0.0);
                !swept.intersects(slot)
            })
        })
    }
}
