//! Straight-line projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{BULLET_HEIGHT, BULLET_WIDTH};

/// Who fired the bullet (also picks its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// A bullet moving horizontally at a constant per-frame speed
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame, positive = rightward
    pub speed: f32,
    pub faction: Faction,
}

impl Bullet {
    pub fn new(pos: Vec2, speed: f32, faction: Faction) -> Self {
        Self {
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed,
            faction,
        }
    }

    pub fn player(pos: Vec2, speed: f32) -> Self {
        Self::new(pos, speed, Faction::Player)
    }

    pub fn enemy(pos: Vec2, speed: f32) -> Self {
        Self::new(pos, speed, Faction::Enemy)
    }

    /// Advance one frame
    #[inline]
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Past the right edge, or fully past the left edge
    pub fn is_off_screen(&self, screen_width: f32) -> bool {
        self.pos.x > screen_width || self.pos.x + self.size.x < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_bullet_leaves_right_edge() {
        let mut bullet = Bullet::player(Vec2::new(795.0, 100.0), 7.0);
        assert!(!bullet.is_off_screen(800.0));
        bullet.update();
        assert_eq!(bullet.pos.x, 802.0);
        assert!(bullet.is_off_screen(800.0));
    }

    #[test]
    fn test_enemy_bullet_leaves_left_edge() {
        let mut bullet = Bullet::enemy(Vec2::new(-4.0, 100.0), -7.0);
        // Trailing edge still on screen at x = 6
        assert!(!bullet.is_off_screen(800.0));
        bullet.update();
        assert_eq!(bullet.pos.x, -11.0);
        assert!(bullet.is_off_screen(800.0));
    }

    #[test]
    fn test_trailing_edge_at_zero_is_on_screen() {
        let mut bullet = Bullet::enemy(Vec2::new(-3.0, 100.0), -7.0);
        bullet.update();
        assert_eq!(bullet.pos.x + bullet.size.x, 0.0);
        assert!(!bullet.is_off_screen(800.0));
        bullet.update();
        assert!(bullet.is_off_screen(800.0));
    }

    proptest! {
        #[test]
        fn prop_advances_n_times_speed(
            start in 0i32..800,
            speed in -10i32..=10,
            ticks in 0u32..200,
        ) {
            // Integer-valued floats keep the sum exact
            let mut bullet = Bullet::player(Vec2::new(start as f32, 50.0), speed as f32);
            for _ in 0..ticks {
                bullet.update();
            }
            let expected = start as f32 + ticks as f32 * speed as f32;
            prop_assert_eq!(bullet.pos.x, expected);
            prop_assert_eq!(bullet.pos.y, 50.0);
        }
    }
}
