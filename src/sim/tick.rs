//! Per-frame simulation tick
//!
//! Advances the session by one display frame: player input, auto-fire,
//! bullets, enemies, collisions, scoring and the game-over transition.

use super::collision::{circles_collide, rects_overlap};
use super::state::{GamePhase, GameState};
use crate::input::Intent;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Held arrow keys
    pub intent: Intent,
    /// Active touch point in canvas pixels
    pub touch_y: Option<f32>,
}

/// What happened during one tick (drives audio and HUD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub spread_fired: bool,
    pub enemy_shots: u32,
    pub enemies_destroyed: u32,
    pub game_over: bool,
}

/// Advance the session by one frame
///
/// `now_ms` is session time (milliseconds since the session started). Does
/// nothing once the session is over.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> FrameEvents {
    let mut events = FrameEvents::default();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.frame += 1;
    state.player.apply_input(input, &state.config);

    // Auto-fire
    if now_ms - state.last_shot_ms > state.config.fire_interval_ms {
        state.fire_spread();
        state.last_shot_ms = now_ms;
        events.spread_fired = true;
    }

    let width = state.config.width;
    for bullet in &mut state.player_bullets {
        bullet.update();
    }
    state.player_bullets.retain(|b| !b.is_off_screen(width));

    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    state.enemy_bullets.retain(|b| !b.is_off_screen(width));

    // Enemies are moved out and the survivors written back, so removing one
    // never shifts another under the loop.
    let player_circle = state.player.circle();
    let enemy_bullets_before = state.enemy_bullets.len();
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        if state.phase == GamePhase::GameOver {
            survivors.push(enemy);
            continue;
        }

        enemy.update(&state.config, &mut state.rng, &mut state.enemy_bullets);
        if enemy.is_off_screen() {
            continue;
        }

        let enemy_rect = enemy.rect();
        let mut destroyed = false;
        state.player_bullets.retain(|bullet| {
            if destroyed || !rects_overlap(&bullet.rect(), &enemy_rect) {
                return true;
            }
            destroyed = enemy.take_hit();
            false
        });

        if destroyed {
            state.score += state.config.kill_reward;
            events.enemies_destroyed += 1;
        }

        if circles_collide(&player_circle, &enemy.circle()) {
            state.phase = GamePhase::GameOver;
        }

        if !destroyed {
            survivors.push(enemy);
        }
    }
    state.enemies = survivors;
    events.enemy_shots = (state.enemy_bullets.len() - enemy_bullets_before) as u32;

    if state.phase == GamePhase::Running {
        let player_rect = state.player.rect();
        if state
            .enemy_bullets
            .iter()
            .any(|bullet| rects_overlap(&bullet.rect(), &player_rect))
        {
            state.phase = GamePhase::GameOver;
        }
    }

    if state.phase == GamePhase::GameOver {
        events.game_over = true;
        log::info!(
            "Game over at frame {}: score {}",
            state.frame,
            state.score
        );
    }

    events
}
