//! Axis-aligned rectangle geometry for lanes, obstacles and hitboxes
//!
//! Screen coordinates: x grows right, y grows down, (x, y) is the top-left
//! corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Copy moved horizontally so its left edge sits at `left`
    pub fn with_left(self, left: f32) -> Self {
        Self { x: left, ..self }
    }

    /// Copy moved horizontally so its right edge sits at `right`
    pub fn with_right(self, right: f32) -> Self {
        Self {
            x: right - self.w,
            ..self
        }
    }

    /// Copy translated by `dx` along x
    pub fn shifted_x(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            ..self
        }
    }

    /// Grow (positive) or shrink (negative) around the centre.
    ///
    /// `dw` and `dh` are total size changes, split evenly between opposite
    /// sides. Sizes never go below zero.
    pub fn inflate(self, dw: f32, dh: f32) -> Self {
        let w = (self.w + dw).max(0.0);
        let h = (self.h + dh).max(0.0);
        Self::from_center(self.center(), w, h)
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}
