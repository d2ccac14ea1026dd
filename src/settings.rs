//! Game settings and preferences
//!
//! Persisted in LocalStorage, separately from anything gameplay owns.

use serde::{Deserialize, Serialize};

use crate::consts::ROUND_SECONDS;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Countdown length for each round, seconds
    pub round_seconds: u32,

    // === Flow ===
    /// Start a fresh round automatically after the outcome screen
    pub auto_restart: bool,
    /// Delay before the automatic restart, milliseconds
    pub restart_delay_ms: u32,

    // === Visual Effects ===
    /// Burst particles when a fruit lands
    pub particles: bool,
    /// Pull-back aim line while dragging
    pub aim_line: bool,

    // === Accessibility ===
    /// Reduced motion (suppress the particle burst)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,

            auto_restart: false,
            restart_delay_ms: 3000,

            particles: true,
            aim_line: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective particle toggle (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "bucket_toss_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_suppresses_particles() {
        let mut settings = Settings::default();
        assert!(settings.effective_particles());

        settings.reduced_motion = true;
        assert!(!settings.effective_particles());

        settings.reduced_motion = false;
        settings.particles = false;
        assert!(!settings.effective_particles());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            auto_restart: true,
            round_seconds: 45,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.round_seconds, 45);
        assert!(back.auto_restart);
    }
}
