//! Game settings and preferences
//!
//! Persisted to LocalStorage; never gameplay-affecting. The simulation runs
//! identically whatever these say.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum droplets per splash for this preset
    pub fn max_splash_droplets(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 12,
            QualityPreset::High => 20,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Water splash particles when steering
    pub splashes: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (disables splashes regardless of quality)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            splashes: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// How many droplets per splash group to draw (0 = none)
    pub fn effective_splash_droplets(&self) -> usize {
        if !self.splashes || self.reduced_motion {
            return 0;
        }
        self.quality.max_splash_droplets()
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "otter_river_settings";

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
    fn test_reduced_motion_disables_splashes() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_splash_droplets(), 0);
    }

    #[test]
    fn test_low_quality_disables_splashes() {
        let settings = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        assert_eq!(settings.effective_splash_droplets(), 0);
    }

    #[test]
    fn test_preset_round_trips_through_str() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
    }
}
