//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only
//! - One `tick` per display frame, wall-clock time passed in
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;

pub use bullet::{Bullet, Faction};
pub use collision::{Circle, Rect, circles_collide, rects_overlap};
pub use enemy::{Enemy, EnemyKind, Movement};
pub use snapshot::{Snapshot, Sprite, SpriteRect};
pub use state::{GamePhase, GameState, Player};
pub use tick::{FrameEvents, TickInput, tick};
pub use timer::IntervalTimer;
