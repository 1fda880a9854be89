//! Read-only view of a frame for presentation
//!
//! The renderer and HUD consume a `Snapshot` and never touch `GameState`.

use serde::Serialize;

use super::bullet::Faction;
use super::enemy::EnemyKind;
use super::state::{GamePhase, GameState};

/// What a rectangle on screen depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sprite {
    Player,
    Enemy(EnemyKind),
    PlayerBullet,
    EnemyBullet,
}

/// A sprite placed on the canvas (top-left origin, pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteRect {
    pub sprite: Sprite,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub player: SpriteRect,
    pub enemies: Vec<SpriteRect>,
    pub bullets: Vec<SpriteRect>,
    pub score: u64,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = SpriteRect {
            sprite: Sprite::Player,
            x: state.player.pos.x,
            y: state.player.pos.y,
            width: state.player.size,
            height: state.player.size,
        };

        let enemies = state
            .enemies
            .iter()
            .map(|enemy| SpriteRect {
                sprite: Sprite::Enemy(enemy.kind()),
                x: enemy.pos.x,
                y: enemy.pos.y,
                width: enemy.size,
                height: enemy.size,
            })
            .collect();

        let bullets = state
            .player_bullets
            .iter()
            .chain(state.enemy_bullets.iter())
            .map(|bullet| SpriteRect {
                sprite: match bullet.faction {
                    Faction::Player => Sprite::PlayerBullet,
                    Faction::Enemy => Sprite::EnemyBullet,
                },
                x: bullet.pos.x,
                y: bullet.pos.y,
                width: bullet.size.x,
                height: bullet.size.y,
            })
            .collect();

        Self {
            width: state.config.width,
            height: state.config.height,
            player,
            enemies,
            bullets,
            score: state.score,
            game_over: state.phase == GamePhase::GameOver,
        }
    }

    /// Every sprite in draw order (enemies, bullets, then the player on top)
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteRect> {
        self.enemies
            .iter()
            .chain(self.bullets.iter())
            .chain(std::iter::once(&self.player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(GameConfig::default(), 3);
        state.spawn_enemy();
        state.fire_spread();
        state.score = 40;

        let snapshot = Snapshot::capture(&state);
        assert_eq!((snapshot.width, snapshot.height), (800.0, 600.0));
        assert_eq!(snapshot.player.x, 50.0);
        assert_eq!(snapshot.player.width, 50.0);
        assert_eq!(snapshot.enemies.len(), 1);
        assert_eq!(
            snapshot.enemies[0].sprite,
            Sprite::Enemy(state.enemies[0].kind())
        );
        assert_eq!(snapshot.bullets.len(), 3);
        assert!(
            snapshot
                .bullets
                .iter()
                .all(|b| b.sprite == Sprite::PlayerBullet && b.width == 10.0 && b.height == 5.0)
        );
        assert_eq!(snapshot.score, 40);
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.sprites().count(), 5);
        assert_eq!(snapshot.sprites().last().map(|s| s.sprite), Some(Sprite::Player));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(GameConfig::default(), 3);
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"game_over\":false"));
    }
}
