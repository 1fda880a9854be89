//! Sky Shooter - a side-scrolling canvas shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (enemies, bullets, collisions, scoring)
//! - `session`: Session lifecycle and the two scheduled loops (frame, spawn)
//! - `input`: Keyboard/touch state normalized into movement intent
//! - `config`: Screen profiles and game tuning
//! - `renderer`: WebGPU rendering of simulation snapshots

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, EnemyTuning, GameConfig, Roster, ScreenProfile};
pub use session::{FrameReport, Session, TaskKind, TaskStatus, TaskToken, Tasks};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Display refresh rate the per-frame tuning assumes
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Nominal frame duration (ms)
    pub const FRAME_MS: f64 = 1000.0 / FRAMES_PER_SECOND as f64;

    /// Desktop canvas dimensions
    pub const DESKTOP_WIDTH: f32 = 800.0;
    pub const DESKTOP_HEIGHT: f32 = 600.0;
    /// Player/enemy sprite size per profile
    pub const DESKTOP_SPRITE_SIZE: f32 = 50.0;
    pub const MOBILE_SPRITE_SIZE: f32 = 40.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    /// Keyboard movement (pixels/frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Exponential blend toward the touch target per frame
    pub const TOUCH_BLEND: f32 = 0.1;
    /// Auto-fire period (ms)
    pub const FIRE_INTERVAL_MS: f64 = 300.0;
    /// Vertical gap between spread bullets
    pub const SPREAD_OFFSET: f32 = 10.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 5.0;
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = -7.0;

    /// Enemy defaults
    pub const ENEMY_HEALTH: i32 = 6;
    pub const KILL_REWARD: u64 = 10;
    /// Wall-clock spawn period (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 400.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const FIGHTER_SPEED: f32 = 4.0;
    pub const FIGHTER_VERTICAL_SPEED: f32 = 2.0;
    /// Per-frame chance a fighter reverses vertically
    pub const FIGHTER_FLIP_CHANCE: f64 = 0.02;
    pub const CIRCLE_AMPLITUDE: f32 = 2.0;
    pub const CIRCLE_PHASE_STEP: f32 = 0.05;
    pub const ZIGZAG_AMPLITUDE: f32 = 5.0;
    pub const ZIGZAG_PHASE_STEP: f32 = 0.1;
    /// Frames between shooter volleys
    pub const SHOOTER_COOLDOWN: i32 = 100;
    /// Frames before a pause-move enemy doubles its speed (1.5s at 60 Hz)
    pub const PAUSE_MOVE_THRESHOLD: u32 = 90;
}

/// Clamp `value` into `[min, max]`, mapping NaN to `min`
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_finite() {
        assert_eq!(clamp_finite(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_finite(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_finite(f32::NAN, 0.0, 10.0), 0.0);
        assert_eq!(clamp_finite(f32::INFINITY, 0.0, 10.0), 10.0);
        // Degenerate range collapses to min
        assert_eq!(clamp_finite(3.0, 5.0, 1.0), 5.0);
    }
}
