//! Collision tests
//!
//! Two shapes only: circles for ship-vs-ship contact, axis-aligned rectangles
//! for anything involving a bullet. Both tests are strict, so shapes that
//! merely touch do not collide.

use glam::Vec2;

/// A collision circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle inscribed in a square sprite whose top-left corner is `pos`
    pub fn inscribed(pos: Vec2, radius: f32) -> Self {
        Self {
            center: pos + Vec2::splat(radius),
            radius,
        }
    }
}

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Center distance strictly less than the sum of radii
#[inline]
pub fn circles_collide(a: &Circle, b: &Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

/// Open-interval overlap on both axes
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}
