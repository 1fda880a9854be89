//! Session lifecycle and scheduled loops
//!
//! A session drives two loops: a display-synced frame loop and a wall-clock
//! spawn loop. The driver owns the actual scheduling (animation frames,
//! intervals, or a plain loop on native) and hands each callback the
//! `TaskToken` it was started with. Every restart bumps the generation, so
//! callbacks left over from an earlier session are rejected and told to stop.

use crate::config::{ConfigError, GameConfig, Roster};
use crate::input::InputState;
use crate::sim::{FrameEvents, GameState, IntervalTimer, Snapshot, tick};

/// Which loop a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Frame,
    Spawn,
}

/// Handle for one scheduled loop of one session generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskToken {
    pub kind: TaskKind,
    pub generation: u32,
}

/// Tokens for both loops of a freshly started session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tasks {
    pub frame: TaskToken,
    pub spawn: TaskToken,
}

/// Whether the driver should schedule the loop again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Stop,
}

/// Result of one frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub status: TaskStatus,
    pub events: FrameEvents,
}

impl FrameReport {
    fn stop() -> Self {
        Self {
            status: TaskStatus::Stop,
            events: FrameEvents::default(),
        }
    }
}

/// One game session plus the bookkeeping for its loops
pub struct Session {
    state: GameState,
    input: InputState,
    generation: u32,
    /// Driver clock reading when the current generation started
    started_at_ms: f64,
    spawn_timer: IntervalTimer,
    frame_active: bool,
}

impl Session {
    /// Create a session; loops are idle until `start`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let mut spawn_timer = IntervalTimer::new(config.spawn_interval_ms);
        spawn_timer.cancel();

        log::info!(
            "Session created: {:?} {}x{}, roster {}, seed {}",
            config.profile,
            config.width,
            config.height,
            config.roster.as_str(),
            seed
        );

        Ok(Self {
            state: GameState::new(config, seed),
            input: InputState::new(),
            generation: 0,
            started_at_ms: 0.0,
            spawn_timer,
            frame_active: false,
        })
    }

    /// Activate both loops at driver time `now_ms`
    pub fn start(&mut self, now_ms: f64) -> Tasks {
        self.started_at_ms = now_ms;
        self.frame_active = true;
        self.spawn_timer.restart();
        log::info!("Session started (generation {})", self.generation);
        self.tasks()
    }

    fn tasks(&self) -> Tasks {
        Tasks {
            frame: TaskToken {
                kind: TaskKind::Frame,
                generation: self.generation,
            },
            spawn: TaskToken {
                kind: TaskKind::Spawn,
                generation: self.generation,
            },
        }
    }

    /// Token belongs to this generation and its loop is still running
    fn accepts(&self, token: TaskToken, kind: TaskKind) -> bool {
        if token.kind != kind || token.generation != self.generation {
            log::debug!(
                "Rejected stale {:?} task (generation {}, current {})",
                token.kind,
                token.generation,
                self.generation
            );
            return false;
        }
        match kind {
            TaskKind::Frame => self.frame_active,
            TaskKind::Spawn => self.spawn_timer.is_active(),
        }
    }

    fn cancel_loops(&mut self) {
        self.frame_active = false;
        self.spawn_timer.cancel();
    }

    /// Frame loop callback; `now_ms` is the driver's clock
    pub fn on_frame(&mut self, token: TaskToken, now_ms: f64) -> FrameReport {
        if !self.accepts(token, TaskKind::Frame) {
            return FrameReport::stop();
        }

        let input = self.input.tick_input();
        let events = tick(&mut self.state, &input, now_ms - self.started_at_ms);

        let status = if events.game_over || !self.state.is_running() {
            self.cancel_loops();
            TaskStatus::Stop
        } else {
            TaskStatus::Continue
        };
        FrameReport { status, events }
    }

    /// Spawn loop callback for drivers with a native interval timer
    pub fn on_spawn(&mut self, token: TaskToken) -> TaskStatus {
        if !self.accepts(token, TaskKind::Spawn) {
            return TaskStatus::Stop;
        }
        if self.state.spawn_enemy().is_none() {
            self.cancel_loops();
            return TaskStatus::Stop;
        }
        TaskStatus::Continue
    }

    /// Spawn loop for drivers that only report elapsed time
    pub fn advance_spawn_clock(&mut self, token: TaskToken, elapsed_ms: f64) -> TaskStatus {
        if !self.accepts(token, TaskKind::Spawn) {
            return TaskStatus::Stop;
        }
        for _ in 0..self.spawn_timer.advance(elapsed_ms) {
            if self.state.spawn_enemy().is_none() {
                self.cancel_loops();
                return TaskStatus::Stop;
            }
        }
        TaskStatus::Continue
    }

    /// New session in place; tokens from earlier generations go stale
    pub fn restart(&mut self, seed: u64, now_ms: f64) -> Tasks {
        let final_score = self.state.score;
        self.cancel_loops();
        self.generation = self.generation.wrapping_add(1);
        self.state.reset(seed);
        self.input.reset();
        log::info!(
            "Restart (previous score {}), seed {}",
            final_score,
            seed
        );
        self.start(now_ms)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    /// Enemy patterns for spawns from now on
    pub fn set_roster(&mut self, roster: Roster) {
        if self.state.config.roster != roster {
            log::info!("Roster switched to {}", roster.as_str());
            self.state.config.roster = roster;
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        !self.state.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::input::Key;
    use crate::sim::{Bullet, Enemy, EnemyKind, GamePhase};
    use glam::Vec2;

    fn session() -> (Session, Tasks) {
        let mut session = Session::new(GameConfig::default(), 77).unwrap();
        let tasks = session.start(1_000.0);
        (session, tasks)
    }

    fn place(session: &mut Session, kind: EnemyKind, pos: Vec2) {
        let state = session.state_mut();
        let id = state.next_entity_id();
        let enemy = Enemy::new(id, kind, pos, &state.config);
        state.enemies.push(enemy);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.height = 0.0;
        assert!(Session::new(config, 1).is_err());

        let mut config = GameConfig::default();
        config.enemy.speed = f32::NAN;
        assert!(matches!(
            Session::new(config, 1),
            Err(ConfigError::NonPositive { field: "enemy.speed", .. })
        ));
    }

    #[test]
    fn test_frames_run_until_started() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        let token = TaskToken {
            kind: TaskKind::Frame,
            generation: 0,
        };
        assert_eq!(session.on_frame(token, 0.0).status, TaskStatus::Stop);
        assert_eq!(session.state().frame, 0);

        let tasks = session.start(0.0);
        assert_eq!(session.on_frame(tasks.frame, FRAME_MS).status, TaskStatus::Continue);
        assert_eq!(session.state().frame, 1);
    }

    #[test]
    fn test_fire_clock_is_session_relative() {
        let (mut session, tasks) = session();
        // Driver clock started at 1000 ms; the first frame fires at once
        let report = session.on_frame(tasks.frame, 1_000.0);
        assert!(report.events.spread_fired);
        let report = session.on_frame(tasks.frame, 1_250.0);
        assert!(!report.events.spread_fired);
        let report = session.on_frame(tasks.frame, 1_301.0);
        assert!(report.events.spread_fired);
    }

    #[test]
    fn test_spawner_interval() {
        let (mut session, tasks) = session();
        assert_eq!(session.advance_spawn_clock(tasks.spawn, 399.0), TaskStatus::Continue);
        assert!(session.state().enemies.is_empty());
        session.advance_spawn_clock(tasks.spawn, 1.0);
        assert_eq!(session.state().enemies.len(), 1);
        session.advance_spawn_clock(tasks.spawn, 800.0);
        assert_eq!(session.state().enemies.len(), 3);

        assert_eq!(session.on_spawn(tasks.spawn), TaskStatus::Continue);
        assert_eq!(session.state().enemies.len(), 4);
    }

    #[test]
    fn test_keyboard_reaches_player() {
        let (mut session, tasks) = session();
        session.input_mut().key_down(Key::Up);
        session.on_frame(tasks.frame, 1_001.0);
        assert_eq!(session.state().player.pos.y, 270.0);
        session.input_mut().key_up(Key::Up);
        session.on_frame(tasks.frame, 1_002.0);
        assert_eq!(session.state().player.pos.y, 270.0);
    }

    #[test]
    fn test_straight_enemy_destroyed_by_six_hits() {
        let (mut session, tasks) = session();
        // Keep the player's own spread out of the way
        session.state_mut().config.fire_interval_ms = f64::INFINITY;
        place(&mut session, EnemyKind::Straight, Vec2::new(780.0, 100.0));

        let mut now = 1_000.0;
        for _ in 0..6 {
            let x = session.state().enemies[0].pos.x;
            session
                .state_mut()
                .player_bullets
                .push(Bullet::player(Vec2::new(x - 5.0, 110.0), 7.0));
            now += FRAME_MS;
            session.on_frame(tasks.frame, now);
        }
        assert!(session.state().enemies.is_empty());
        assert_eq!(session.score(), 10);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_contact_ends_session_and_stops_loops() {
        let (mut session, tasks) = session();
        let player_pos = session.state().player.pos;
        place(&mut session, EnemyKind::Straight, player_pos);

        let report = session.on_frame(tasks.frame, 1_016.0);
        assert!(report.events.game_over);
        assert_eq!(report.status, TaskStatus::Stop);
        assert!(session.is_game_over());

        let frozen = session.snapshot();
        // Late callbacks from the ended session change nothing
        assert_eq!(session.on_frame(tasks.frame, 2_000.0).status, TaskStatus::Stop);
        assert_eq!(session.on_spawn(tasks.spawn), TaskStatus::Stop);
        assert_eq!(session.advance_spawn_clock(tasks.spawn, 5_000.0), TaskStatus::Stop);
        assert_eq!(session.snapshot(), frozen);
        assert!(frozen.game_over);
    }

    #[test]
    fn test_restart_clears_state_and_rejects_old_tokens() {
        let (mut session, old) = session();
        session.advance_spawn_clock(old.spawn, 2_000.0);
        session.state_mut().score = 90;
        session.state_mut().fire_spread();
        session.input_mut().key_down(Key::Down);
        session.state_mut().phase = GamePhase::GameOver;

        let tasks = session.restart(5, 10_000.0);
        assert_ne!(tasks, old);
        assert_eq!(session.generation(), 1);

        let state = session.state();
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());

        // Orphaned loops from the first session are refused
        assert_eq!(session.on_spawn(old.spawn), TaskStatus::Stop);
        assert_eq!(session.on_frame(old.frame, 10_016.0).status, TaskStatus::Stop);
        assert!(session.state().enemies.is_empty());
        assert_eq!(session.state().frame, 0);

        // Input was reset along with the state
        session.on_frame(tasks.frame, 10_016.0);
        assert_eq!(session.state().player.pos.y, 275.0);

        // Spawner resumes on the configured interval
        session.advance_spawn_clock(tasks.spawn, 399.0);
        assert!(session.state().enemies.is_empty());
        session.advance_spawn_clock(tasks.spawn, 1.0);
        assert_eq!(session.state().enemies.len(), 1);
    }

    #[test]
    fn test_roster_switch_survives_restart() {
        let (mut session, _) = session();
        session.set_roster(Roster::Classic);
        let tasks = session.restart(8, 5_000.0);
        assert_eq!(session.config().roster, Roster::Classic);

        session.advance_spawn_clock(tasks.spawn, 400.0 * 300.0);
        assert_eq!(session.state().enemies.len(), 300);
        assert!(
            session
                .state()
                .enemies
                .iter()
                .all(|e| e.kind() != EnemyKind::Fighter)
        );
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let (mut session, tasks) = session();
        assert_eq!(session.on_spawn(tasks.frame), TaskStatus::Stop);
        assert_eq!(session.on_frame(tasks.spawn, 1_016.0).status, TaskStatus::Stop);
        assert!(session.state().enemies.is_empty());
        assert_eq!(session.state().frame, 0);
    }
}
