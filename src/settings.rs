//! Game settings and preferences
//!
//! Persisted separately from progression under its own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError, Storage};
use crate::sim::MAX_PARTICLES;

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

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 160,
            QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Whether to draw the scrolling background grid
    pub fn grid_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Jump/crash bursts
    pub particles: bool,
    /// Progress bar along the top edge
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            show_progress: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neonDashSettings";

    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Apply a preset name such as "low" or "HIGH".
    ///
    /// Returns true if the quality changed; unknown names leave it untouched.
    pub fn apply_quality_name(&mut self, name: &str) -> bool {
        let Some(preset) = QualityPreset::parse(name.trim()) else {
            log::warn!("Unknown quality preset {:?}, keeping {}", name, self.quality.as_str());
            return false;
        };
        if preset == self.quality {
            return false;
        }
        log::info!("Quality {} -> {}", self.quality.as_str(), preset.as_str());
        self.quality = preset;
        true
    }

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(storage: &dyn Storage) -> Self {
        persistence::load_or_default(storage, Self::STORAGE_KEY)
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_particle_cap() {
        let mut s = Settings::from_preset(QualityPreset::High);
        assert_eq!(s.max_particles(), MAX_PARTICLES);
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
        assert!(QualityPreset::Low.max_particles() < QualityPreset::Medium.max_particles());
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_apply_quality_name() {
        let mut s = Settings::default();
        assert!(s.apply_quality_name(" low "));
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(!s.apply_quality_name("LOW"));
        assert!(!s.apply_quality_name("ultra"));
        assert_eq!(s.quality, QualityPreset::Low);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());

        let settings = Settings {
            quality: QualityPreset::Low,
            particles: false,
            show_progress: false,
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let mut storage = MemoryStorage::new();
        storage.set(Settings::STORAGE_KEY, "[1,2,3]").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());

        storage
            .set(Settings::STORAGE_KEY, r#"{"quality":"High"}"#)
            .unwrap();
        let s = Settings::load(&storage);
        assert_eq!(s.quality, QualityPreset::High);
        assert!(s.particles);
    }
}
