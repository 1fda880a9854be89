//! Enemy ships and their movement patterns
//!
//! Each enemy carries a `Movement` whose variant is fixed at spawn. The variant
//! holds the only mutable per-pattern state, and `Enemy::update` is the single
//! place where that state advances.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collision::{Circle, Rect};
use crate::config::{EnemyTuning, GameConfig};

/// Movement pattern tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Straight,
    Circle,
    Zigzag,
    Shooter,
    PauseMove,
    Fighter,
}

/// Pattern-specific movement state
#[derive(Debug, Clone, PartialEq)]
pub enum Movement {
    Straight,
    /// Gentle sine drift
    Circle { phase: f32 },
    /// Wide, fast sine weave
    Zigzag { phase: f32 },
    /// Fires whenever `cooldown` runs out
    Shooter { cooldown: i32 },
    /// Doubles `speed` once after `frames` reaches the threshold
    PauseMove {
        speed: f32,
        frames: u32,
        accelerated: bool,
    },
    /// Vertical sweep, `direction` is +1 (down) or -1 (up)
    Fighter { direction: f32 },
}

impl Movement {
    /// Fresh state for a pattern
    pub fn initial(kind: EnemyKind, tuning: &EnemyTuning, direction: f32) -> Self {
        match kind {
            EnemyKind::Straight => Movement::Straight,
            EnemyKind::Circle => Movement::Circle { phase: 0.0 },
            EnemyKind::Zigzag => Movement::Zigzag { phase: 0.0 },
            EnemyKind::Shooter => Movement::Shooter { cooldown: 0 },
            EnemyKind::PauseMove => Movement::PauseMove {
                speed: tuning.speed,
                frames: 0,
                accelerated: false,
            },
            EnemyKind::Fighter => Movement::Fighter {
                direction: if direction < 0.0 { -1.0 } else { 1.0 },
            },
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Movement::Straight => EnemyKind::Straight,
            Movement::Circle { .. } => EnemyKind::Circle,
            Movement::Zigzag { .. } => EnemyKind::Zigzag,
            Movement::Shooter { .. } => EnemyKind::Shooter,
            Movement::PauseMove { .. } => EnemyKind::PauseMove,
            Movement::Fighter { .. } => EnemyKind::Fighter,
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub radius: f32,
    pub health: i32,
    pub movement: Movement,
}

impl Enemy {
    /// Place an enemy at `pos` with deterministic initial state
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, config: &GameConfig) -> Self {
        Self {
            id,
            pos,
            size: config.enemy_size,
            radius: config.enemy_size / 2.0,
            health: config.enemy_health,
            movement: Movement::initial(kind, &config.enemy, 1.0),
        }
    }

    /// Enter from the right edge at a random height
    pub fn spawn(id: u32, kind: EnemyKind, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let max_y = config.height - config.enemy_size;
        let y = if max_y > 0.0 {
            rng.random_range(0.0..max_y)
        } else {
            0.0
        };
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        Self {
            id,
            pos: Vec2::new(config.width, y),
            size: config.enemy_size,
            radius: config.enemy_size / 2.0,
            health: config.enemy_health,
            movement: Movement::initial(kind, &config.enemy, direction),
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.movement.kind()
    }

    /// Advance one frame; shooters append their shots to `enemy_bullets`
    pub fn update(
        &mut self,
        config: &GameConfig,
        rng: &mut impl Rng,
        enemy_bullets: &mut Vec<Bullet>,
    ) {
        let tuning = &config.enemy;
        let mut fire = false;

        match &mut self.movement {
            Movement::Straight => {
                self.pos.x -= tuning.speed;
            }
            Movement::Circle { phase } => {
                self.pos.x -= tuning.speed;
                self.pos.y += phase.sin() * tuning.circle_amplitude;
                *phase += tuning.circle_phase_step;
            }
            Movement::Zigzag { phase } => {
                self.pos.x -= tuning.speed;
                self.pos.y += phase.sin() * tuning.zigzag_amplitude;
                *phase += tuning.zigzag_phase_step;
            }
            Movement::Shooter { cooldown } => {
                self.pos.x -= tuning.speed;
                if *cooldown <= 0 {
                    fire = true;
                    *cooldown = tuning.shooter_cooldown;
                } else {
                    *cooldown -= 1;
                }
            }
            Movement::PauseMove {
                speed,
                frames,
                accelerated,
            } => {
                *frames = frames.saturating_add(1);
                if !*accelerated && *frames >= tuning.pause_move_threshold {
                    *speed *= 2.0;
                    *accelerated = true;
                }
                self.pos.x -= *speed;
            }
            Movement::Fighter { direction } => {
                self.pos.x -= tuning.fighter_speed;
                self.pos.y += *direction * tuning.fighter_vertical_speed;

                if self.pos.y <= 0.0 || self.pos.y + self.size >= config.height {
                    *direction = -*direction;
                }
                if rng.random_bool(tuning.fighter_flip_chance) {
                    *direction = -*direction;
                }
            }
        }

        if fire {
            self.shoot(config, enemy_bullets);
        }
    }

    /// Fire one bullet leftward from the nose
    pub fn shoot(&self, config: &GameConfig, enemy_bullets: &mut Vec<Bullet>) {
        let muzzle = Vec2::new(self.pos.x, self.pos.y + self.size / 2.0);
        enemy_bullets.push(Bullet::enemy(muzzle, config.enemy_bullet_speed));
    }

    /// Register one hit, returns true when this hit destroys the enemy
    pub fn take_hit(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }

    /// Right edge has passed the left screen bound
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size < 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    pub fn circle(&self) -> Circle {
        Circle::inscribed(self.pos, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemy.fighter_flip_chance = 0.0;
        config
    }

    fn step(enemy: &mut Enemy, config: &GameConfig, rng: &mut Pcg32) -> Vec<Bullet> {
        let mut shots = Vec::new();
        enemy.update(config, rng, &mut shots);
        shots
    }

    #[test]
    fn test_straight_moves_left_only() {
        let config = quiet_config();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, EnemyKind::Straight, Vec2::new(780.0, 200.0), &config);
        for _ in 0..10 {
            step(&mut enemy, &config, &mut rng);
        }
        assert_eq!(enemy.pos, Vec2::new(750.0, 200.0));
    }

    #[test]
    fn test_zigzag_swings_wider_than_circle() {
        let config = quiet_config();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut circle = Enemy::new(1, EnemyKind::Circle, Vec2::new(700.0, 300.0), &config);
        let mut zigzag = Enemy::new(2, EnemyKind::Zigzag, Vec2::new(700.0, 300.0), &config);

        let (mut circle_span, mut zigzag_span) = (0.0f32, 0.0f32);
        for _ in 0..63 {
            step(&mut circle, &config, &mut rng);
            step(&mut zigzag, &config, &mut rng);
            circle_span = circle_span.max((circle.pos.y - 300.0).abs());
            zigzag_span = zigzag_span.max((zigzag.pos.y - 300.0).abs());
        }
        assert!(zigzag_span > circle_span);
        assert_eq!(circle.pos.x, zigzag.pos.x);
    }

    #[test]
    fn test_shooter_fires_on_cooldown() {
        let config = quiet_config();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, EnemyKind::Shooter, Vec2::new(700.0, 100.0), &config);

        // Fires immediately, then every cooldown + 1 frames
        let shots = step(&mut enemy, &config, &mut rng);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].pos, Vec2::new(697.0, 125.0));
        assert_eq!(shots[0].speed, -7.0);

        let period = config.enemy.shooter_cooldown as usize + 1;
        let mut fired_at = Vec::new();
        for frame in 1..=(period * 2) {
            if !step(&mut enemy, &config, &mut rng).is_empty() {
                fired_at.push(frame);
            }
        }
        assert_eq!(fired_at, vec![period, period * 2]);
    }

    #[test]
    fn test_pause_move_doubles_exactly_once() {
        let config = quiet_config();
        let threshold = config.enemy.pause_move_threshold;
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, EnemyKind::PauseMove, Vec2::new(10_000.0, 100.0), &config);

        for frame in 1..=(threshold * 3) {
            let before = enemy.pos.x;
            step(&mut enemy, &config, &mut rng);
            let moved = before - enemy.pos.x;
            if frame < threshold {
                assert_eq!(moved, 3.0, "frame {frame}");
            } else {
                assert_eq!(moved, 6.0, "frame {frame}");
            }
        }
        assert!(matches!(
            enemy.movement,
            Movement::PauseMove {
                speed,
                accelerated: true,
                ..
            } if speed == 6.0
        ));
    }

    #[test]
    fn test_fighter_flips_at_bounds() {
        let config = quiet_config();
        let mut rng = Pcg32::seed_from_u64(1);

        // Heading up from just below the top edge
        let mut enemy = Enemy::new(1, EnemyKind::Fighter, Vec2::new(700.0, 1.0), &config);
        enemy.movement = Movement::Fighter { direction: -1.0 };
        step(&mut enemy, &config, &mut rng);
        assert_eq!(enemy.pos.y, -1.0);
        assert_eq!(enemy.movement, Movement::Fighter { direction: 1.0 });

        // Heading down into the bottom edge
        let bottom = config.height - config.enemy_size - 1.0;
        let mut enemy = Enemy::new(2, EnemyKind::Fighter, Vec2::new(700.0, bottom), &config);
        step(&mut enemy, &config, &mut rng);
        assert_eq!(enemy.movement, Movement::Fighter { direction: -1.0 });
        assert_eq!(enemy.pos.x, 696.0);
    }

    #[test]
    fn test_fighter_random_flip_away_from_bounds() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut enemy = Enemy::new(1, EnemyKind::Fighter, Vec2::new(700.0, 300.0), &config);

        let mut flips = 0;
        let mut last = 1.0;
        for _ in 0..1000 {
            enemy.pos = Vec2::new(700.0, 300.0);
            step(&mut enemy, &config, &mut rng);
            if let Movement::Fighter { direction } = enemy.movement {
                if direction != last {
                    flips += 1;
                    last = direction;
                }
            }
        }
        assert!(flips > 0);
        assert!(flips < 1000);
    }

    #[test]
    fn test_fighter_always_flips_when_certain() {
        let mut config = GameConfig::default();
        config.enemy.fighter_flip_chance = 1.0;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(1, EnemyKind::Fighter, Vec2::new(700.0, 300.0), &config);

        step(&mut enemy, &config, &mut rng);
        assert_eq!(enemy.movement, Movement::Fighter { direction: -1.0 });
        step(&mut enemy, &config, &mut rng);
        assert_eq!(enemy.movement, Movement::Fighter { direction: 1.0 });
        assert_eq!(enemy.pos.y, 300.0);
    }

    #[test]
    fn test_spawn_enters_from_right() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for kind in config.roster.variants() {
            let enemy = Enemy::spawn(1, *kind, &config, &mut rng);
            assert_eq!(enemy.pos.x, config.width);
            assert!(enemy.pos.y >= 0.0 && enemy.pos.y < config.height - config.enemy_size);
            assert_eq!(enemy.kind(), *kind);
            assert_eq!(enemy.health, 6);
        }
    }

    #[test]
    fn test_take_hit_and_off_screen() {
        let config = quiet_config();
        let mut enemy = Enemy::new(1, EnemyKind::Straight, Vec2::new(-49.0, 0.0), &config);
        assert!(!enemy.is_off_screen());
        enemy.pos.x = -50.5;
        assert!(enemy.is_off_screen());

        for _ in 0..5 {
            assert!(!enemy.take_hit());
        }
        assert!(enemy.take_hit());
        assert_eq!(enemy.health, 0);
    }
}
