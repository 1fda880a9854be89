//! Screen profiles and game tuning
//!
//! Everything here is consumed once at session start. Sizes depend on the
//! device class; the rest of the tuning is shared.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::EnemyKind;

/// Invalid configuration or settings payload
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension, speed or interval that must be positive was not
    NonPositive { field: &'static str, value: f64 },
    /// A probability outside `[0, 1]`
    Probability { field: &'static str, value: f64 },
    /// A tuning value that must be finite was NaN or infinite
    NotFinite { field: &'static str, value: f64 },
    /// Sprites do not fit on the canvas
    SpriteTooLarge { size: f32, height: f32 },
    /// Settings JSON failed to parse
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::Probability { field, value } => {
                write!(f, "{field} must be within [0, 1] (got {value})")
            }
            Self::NotFinite { field, value } => {
                write!(f, "{field} must be finite (got {value})")
            }
            Self::SpriteTooLarge { size, height } => {
                write!(f, "sprite size {size} does not fit canvas height {height}")
            }
            Self::Malformed(msg) => write!(f, "malformed settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Device class, decides canvas and sprite sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenProfile {
    /// Fixed 800x600 canvas
    #[default]
    Desktop,
    /// Canvas fills the window
    Mobile,
}

impl ScreenProfile {
    const MOBILE_AGENTS: [&'static str; 8] = [
        "android",
        "webos",
        "iphone",
        "ipad",
        "ipod",
        "blackberry",
        "iemobile",
        "opera mini",
    ];

    /// Pick a profile from a browser user agent string
    pub fn detect(user_agent: &str) -> Self {
        let agent = user_agent.to_lowercase();
        if Self::MOBILE_AGENTS.iter().any(|needle| agent.contains(needle)) {
            ScreenProfile::Mobile
        } else {
            ScreenProfile::Desktop
        }
    }

    /// Canvas size for this profile given the window's inner size
    pub fn dimensions(&self, window_width: f32, window_height: f32) -> (f32, f32) {
        match self {
            ScreenProfile::Desktop => (DESKTOP_WIDTH, DESKTOP_HEIGHT),
            ScreenProfile::Mobile => (window_width, window_height),
        }
    }

    pub fn sprite_size(&self) -> f32 {
        match self {
            ScreenProfile::Desktop => DESKTOP_SPRITE_SIZE,
            ScreenProfile::Mobile => MOBILE_SPRITE_SIZE,
        }
    }
}

/// Which movement patterns the spawner draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Roster {
    /// All six patterns
    #[default]
    Full,
    /// The five-pattern roster without fighters
    Classic,
}

impl Roster {
    pub fn variants(&self) -> &'static [EnemyKind] {
        match self {
            Roster::Full => &[
                EnemyKind::Circle,
                EnemyKind::Straight,
                EnemyKind::Zigzag,
                EnemyKind::Shooter,
                EnemyKind::PauseMove,
                EnemyKind::Fighter,
            ],
            Roster::Classic => &[
                EnemyKind::Circle,
                EnemyKind::Straight,
                EnemyKind::Zigzag,
                EnemyKind::Shooter,
                EnemyKind::PauseMove,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Roster::Full => "Full",
            Roster::Classic => "Classic",
        }
    }

    /// Cycle to the other roster
    pub fn next(self) -> Self {
        match self {
            Roster::Full => Roster::Classic,
            Roster::Classic => Roster::Full,
        }
    }
}

/// Per-pattern enemy movement tuning (per-frame units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub speed: f32,
    pub fighter_speed: f32,
    pub fighter_vertical_speed: f32,
    pub fighter_flip_chance: f64,
    pub circle_amplitude: f32,
    pub circle_phase_step: f32,
    pub zigzag_amplitude: f32,
    pub zigzag_phase_step: f32,
    pub shooter_cooldown: i32,
    pub pause_move_threshold: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            speed: ENEMY_SPEED,
            fighter_speed: FIGHTER_SPEED,
            fighter_vertical_speed: FIGHTER_VERTICAL_SPEED,
            fighter_flip_chance: FIGHTER_FLIP_CHANCE,
            circle_amplitude: CIRCLE_AMPLITUDE,
            circle_phase_step: CIRCLE_PHASE_STEP,
            zigzag_amplitude: ZIGZAG_AMPLITUDE,
            zigzag_phase_step: ZIGZAG_PHASE_STEP,
            shooter_cooldown: SHOOTER_COOLDOWN,
            pause_move_threshold: PAUSE_MOVE_THRESHOLD,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub profile: ScreenProfile,
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
    pub player_size: f32,
    pub enemy_size: f32,
    /// Keyboard step (pixels/frame)
    pub player_speed: f32,
    /// Touch smoothing factor in `(0, 1]`
    pub touch_blend: f32,
    pub fire_interval_ms: f64,
    pub spread_offset: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_health: i32,
    pub kill_reward: u64,
    pub spawn_interval_ms: f64,
    pub roster: Roster,
    pub enemy: EnemyTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_profile(ScreenProfile::Desktop, DESKTOP_WIDTH, DESKTOP_HEIGHT)
    }
}

impl GameConfig {
    /// Configuration for a profile, `window_*` only matter on mobile
    pub fn for_profile(profile: ScreenProfile, window_width: f32, window_height: f32) -> Self {
        let (width, height) = profile.dimensions(window_width, window_height);
        let size = profile.sprite_size();
        Self {
            profile,
            width,
            height,
            player_size: size,
            enemy_size: size,
            player_speed: PLAYER_SPEED,
            touch_blend: TOUCH_BLEND,
            fire_interval_ms: FIRE_INTERVAL_MS,
            spread_offset: SPREAD_OFFSET,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_health: ENEMY_HEALTH,
            kill_reward: KILL_REWARD,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            roster: Roster::Full,
            enemy: EnemyTuning::default(),
        }
    }

    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Check the tuning is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 13] = [
            ("width", self.width as f64),
            ("height", self.height as f64),
            ("player_size", self.player_size as f64),
            ("enemy_size", self.enemy_size as f64),
            ("player_speed", self.player_speed as f64),
            ("touch_blend", self.touch_blend as f64),
            ("fire_interval_ms", self.fire_interval_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("player_bullet_speed", self.player_bullet_speed as f64),
            ("enemy_health", self.enemy_health as f64),
            ("enemy.speed", self.enemy.speed as f64),
            ("enemy.fighter_speed", self.enemy.fighter_speed as f64),
            (
                "enemy.fighter_vertical_speed",
                self.enemy.fighter_vertical_speed as f64,
            ),
        ];
        for (field, value) in positive {
            // Written so that NaN fails too
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        // Any sign is allowed
        let finite: [(&'static str, f64); 5] = [
            ("spread_offset", self.spread_offset as f64),
            ("enemy.circle_amplitude", self.enemy.circle_amplitude as f64),
            ("enemy.circle_phase_step", self.enemy.circle_phase_step as f64),
            ("enemy.zigzag_amplitude", self.enemy.zigzag_amplitude as f64),
            ("enemy.zigzag_phase_step", self.enemy.zigzag_phase_step as f64),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.enemy.shooter_cooldown < 0 {
            return Err(ConfigError::NonPositive {
                field: "enemy.shooter_cooldown",
                value: self.enemy.shooter_cooldown as f64,
            });
        }

        // Enemy bullets travel leftward
        let leftward = -(self.enemy_bullet_speed as f64);
        if !(leftward > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "enemy_bullet_speed (leftward)",
                value: leftward,
            });
        }

        if self.touch_blend > 1.0 {
            return Err(ConfigError::Probability {
                field: "touch_blend",
                value: self.touch_blend as f64,
            });
        }

        let chance = self.enemy.fighter_flip_chance;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ConfigError::Probability {
                field: "enemy.fighter_flip_chance",
                value: chance,
            });
        }

        let largest = self.player_size.max(self.enemy_size);
        if largest >= self.height {
            return Err(ConfigError::SpriteTooLarge {
                size: largest,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Validate and hand back the config
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_profile() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
        assert_eq!(ScreenProfile::detect(iphone), ScreenProfile::Mobile);
        assert_eq!(ScreenProfile::detect(desktop), ScreenProfile::Desktop);
        assert_eq!(
            ScreenProfile::detect("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"),
            ScreenProfile::Mobile
        );
    }

    #[test]
    fn test_profile_dimensions() {
        let desktop = GameConfig::for_profile(ScreenProfile::Desktop, 1920.0, 1080.0);
        assert_eq!((desktop.width, desktop.height), (800.0, 600.0));
        assert_eq!(desktop.player_size, 50.0);

        let mobile = GameConfig::for_profile(ScreenProfile::Mobile, 390.0, 844.0);
        assert_eq!((mobile.width, mobile.height), (390.0, 844.0));
        assert_eq!(mobile.enemy_size, 40.0);
    }

    #[test]
    fn test_default_validates() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut config = GameConfig::default();
        config.spawn_interval_ms = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "spawn_interval_ms", .. })
        ));

        let mut config = GameConfig::default();
        config.width = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.enemy.fighter_flip_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability { .. })
        ));

        let mut config = GameConfig::default();
        config.enemy_bullet_speed = 7.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.enemy.speed = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "enemy.speed", .. })
        ));

        let mut config = GameConfig::default();
        config.enemy.fighter_speed = -2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "enemy.fighter_speed", .. })
        ));

        let mut config = GameConfig::default();
        config.enemy.fighter_vertical_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.player_speed = -5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "player_speed", .. })
        ));

        let mut config = GameConfig::default();
        config.enemy.zigzag_amplitude = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "enemy.zigzag_amplitude", .. })
        ));

        let mut config = GameConfig::default();
        config.spread_offset = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "spread_offset", .. })
        ));

        // Negative amplitude just mirrors the path
        let mut config = GameConfig::default();
        config.enemy.circle_amplitude = -2.0;
        assert!(config.validate().is_ok());

        // Tiny mobile window
        let config = GameConfig::for_profile(ScreenProfile::Mobile, 300.0, 30.0);
        assert!(matches!(
            config.validated(),
            Err(ConfigError::SpriteTooLarge { .. })
        ));
    }

    #[test]
    fn test_roster_variants() {
        assert_eq!(Roster::Full.variants().len(), 6);
        assert_eq!(Roster::Classic.variants().len(), 5);
        assert!(!Roster::Classic.variants().contains(&EnemyKind::Fighter));
        assert_eq!(Roster::Full.next(), Roster::Classic);
        assert_eq!(Roster::Full.next().next(), Roster::Full);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::NonPositive {
            field: "width",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "width must be positive (got -1)");
    }
}
