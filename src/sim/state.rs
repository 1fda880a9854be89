//! Session state and the player ship
//!
//! Everything a running game mutates lives in `GameState`; `reset` puts it
//! back to the start-of-session state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::{Circle, Rect};
use super::enemy::Enemy;
use super::tick::TickInput;
use crate::clamp_finite;
use crate::config::GameConfig;
use crate::consts::PLAYER_START_X;
use crate::input::Intent;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Terminal until restart
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub radius: f32,
    /// Intent applied on the last tick
    pub intent: Intent,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                PLAYER_START_X,
                config.height / 2.0 - config.player_size / 2.0,
            ),
            size: config.player_size,
            radius: config.player_size / 2.0,
            intent: Intent::Still,
        }
    }

    /// Keyboard steps, then touch smoothing; always ends inside the canvas
    ///
    /// Up and down are stepped one after the other, each gated on its own
    /// edge, so holding both only cancels out away from the edges.
    pub fn apply_input(&mut self, input: &TickInput, config: &GameConfig) {
        let max_y = config.height - self.size;
        self.intent = input.intent;

        if input.intent.wants_up() && self.pos.y > 0.0 {
            self.pos.y -= config.player_speed;
        }
        if input.intent.wants_down() && self.pos.y < max_y {
            self.pos.y += config.player_speed;
        }

        if let Some(touch_y) = input.touch_y.filter(|y| y.is_finite()) {
            let target = touch_y - self.size / 2.0;
            self.pos.y += (target - self.pos.y) * config.touch_blend;
        }

        self.pos.y = clamp_finite(self.pos.y, 0.0, max_y);
    }

    /// Where the spread leaves the ship (right edge, vertical center)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size, self.pos.y + self.size / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    pub fn circle(&self) -> Circle {
        Circle::inscribed(self.pos, self.radius)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed of the current session
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Ticks simulated this session
    pub frame: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Session time of the last spread (ms), `-inf` before the first
    pub last_shot_ms: f64,
    next_id: u32,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = Player::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            frame: 0,
            player,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            last_shot_ms: f64::NEG_INFINITY,
            next_id: 1,
        }
    }

    /// Back to a fresh `Running` session with a new seed
    pub fn reset(&mut self, seed: u64) {
        let config = self.config.clone();
        *self = Self::new(config, seed);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Push one enemy of a uniformly random pattern; no-op after game over
    pub fn spawn_enemy(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let variants = self.config.roster.variants();
        let kind = variants[self.rng.random_range(0..variants.len())];
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, kind, &self.config, &mut self.rng);
        self.enemies.push(enemy);
        Some(id)
    }

    /// Three bullets from the player's nose, offset above/level/below
    pub fn fire_spread(&mut self) {
        let muzzle = self.player.muzzle();
        let offset = self.config.spread_offset;
        for dy in [-offset, 0.0, offset] {
            self.player_bullets.push(Bullet::player(
                muzzle + Vec2::new(0.0, dy),
                self.config.player_bullet_speed,
            ));
        }
    }
}
