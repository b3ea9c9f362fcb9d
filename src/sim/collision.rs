//! Collision detection between the player and obstacles
//!
//! Obstacle hitboxes are shrunk to roughly the visible car body; the player
//! hitbox is already shrunk by `Player::hitbox`.

use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::consts::*;

/// Obstacle rectangle reduced by max(6px, 16%) in width and max(4px, 20%)
/// in height, around its centre
pub fn obstacle_hitbox(rect: &Rect) -> Rect {
    let pad_x = (rect.w * OBSTACLE_PAD_RATIO_X).max(OBSTACLE_PAD_MIN_X);
    let pad_y = (rect.h * OBSTACLE_PAD_RATIO_Y).max(OBSTACLE_PAD_MIN_Y);
    rect.inflate(-pad_x, -pad_y)
}

/// Whether the player's hitbox touches this obstacle's hitbox
pub fn player_hits_obstacle(player_hitbox: &Rect, obstacle: &Obstacle) -> bool {
    player_hitbox.intersects(&obstacle_hitbox(&obstacle.rect))
}
