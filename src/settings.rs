//! Player preferences
//!
//! Persisted in LocalStorage, independent of any game session.

use serde::{Deserialize, Serialize};

use crate::clamp_finite;
use crate::config::{ConfigError, Roster};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Gameplay ===
    /// Enemy patterns the spawner draws from
    pub roster: Roster,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 0.8,
            muted: false,
            show_fps: false,
            roster: Roster::Full,
        }
    }
}

impl Settings {
    /// Parse stored JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Volumes clamped into `[0, 1]`
    pub fn sanitized(mut self) -> Self {
        self.music_volume = clamp_finite(self.music_volume, 0.0, 1.0);
        self.sfx_volume = clamp_finite(self.sfx_volume, 0.0, 1.0);
        self
    }

    /// Effective music gain (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Effective effects gain (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Flip the preference bound to a `KeyboardEvent.key` value
    ///
    /// `f` shows the FPS counter, `m` mutes, `c` cycles the enemy roster
    /// (used from the next restart). Returns whether anything changed.
    pub fn apply_hotkey(&mut self, key: &str) -> bool {
        match key {
            "f" | "F" => self.show_fps = !self.show_fps,
            "m" | "M" => self.muted = !self.muted,
            "c" | "C" => self.roster = self.roster.next(),
            _ => return false,
        }
        true
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "sky_shooter_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
