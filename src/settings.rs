//! Game settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a file only
//! needs the keys it wants to change.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::screen::Screen;
use crate::sim::{CollisionParams, CollisionStrategy, SpawnPolicy};

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "couldn't read settings: {}", e),
            Self::Parse(e) => write!(f, "invalid settings JSON: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub play_width: f32,
    pub play_height: f32,

    // === Spawning ===
    /// Initial asteroid count, inclusive range
    pub asteroid_count_min: u32,
    pub asteroid_count_max: u32,
    /// Random velocity magnitude factor, inclusive range
    pub asteroid_speed_scale_min: f32,
    pub asteroid_speed_scale_max: f32,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,

    // === Pools ===
    pub bullet_capacity: usize,

    // === Collisions ===
    pub collision: CollisionStrategy,
    pub bullet_hit_distance: f32,
    pub player_hit_distance: f32,
    pub asteroid_size: f32,

    // === Loop ===
    /// Unconditional end-of-frame delay
    pub frame_delay_ms: u64,
    /// `title` for the menu build, `play` to drop straight into a round
    pub start_screen: Screen,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,

            asteroid_count_min: ASTEROID_COUNT_MIN,
            asteroid_count_max: ASTEROID_COUNT_MAX,
            asteroid_speed_scale_min: ASTEROID_SPEED_SCALE_MIN,
            asteroid_speed_scale_max: ASTEROID_SPEED_SCALE_MAX,
            seed: None,

            bullet_capacity: BULLET_CAPACITY,

            collision: CollisionStrategy::Distance,
            bullet_hit_distance: BULLET_HIT_DISTANCE,
            player_hit_distance: PLAYER_HIT_DISTANCE,
            asteroid_size: ASTEROID_SIZE,

            frame_delay_ms: FRAME_DELAY_MS,
            start_screen: Screen::Title,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Repair values the simulation can't run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.play_width > 0.0 && self.play_height > 0.0) {
            log::warn!(
                "Play field {}x{} is not positive, using {}x{}",
                self.play_width,
                self.play_height,
                defaults.play_width,
                defaults.play_height
            );
            self.play_width = defaults.play_width;
            self.play_height = defaults.play_height;
        }
        if self.bullet_capacity == 0 {
            log::warn!("Bullet capacity 0, using {}", defaults.bullet_capacity);
            self.bullet_capacity = defaults.bullet_capacity;
        }
        if self.asteroid_count_min > self.asteroid_count_max {
            log::warn!(
                "Asteroid count range {}..={} is inverted, swapping",
                self.asteroid_count_min,
                self.asteroid_count_max
            );
            std::mem::swap(&mut self.asteroid_count_min, &mut self.asteroid_count_max);
        }
        if !(self.asteroid_speed_scale_min <= self.asteroid_speed_scale_max) {
            log::warn!("Asteroid speed scale range is invalid, using defaults");
            self.asteroid_speed_scale_min = defaults.asteroid_speed_scale_min;
            self.asteroid_speed_scale_max = defaults.asteroid_speed_scale_max;
        }

        self
    }

    pub fn collision_params(&self) -> CollisionParams {
        CollisionParams {
            strategy: self.collision,
            bullet_hit_distance: self.bullet_hit_distance,
            player_hit_distance: self.player_hit_distance,
            asteroid_size: self.asteroid_size,
        }
    }

    /// Spawn policy configured from these settings
    pub fn spawn_policy(&self, seed: u64) -> SpawnPolicy {
        SpawnPolicy::new(seed)
            .with_count_range(self.asteroid_count_min, self.asteroid_count_max)
            .with_speed_scale(self.asteroid_speed_scale_min, self.asteroid_speed_scale_max)
    }

    pub fn frame_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.bullet_capacity, 4096);
        assert_eq!(settings.frame_delay_ms, 16);
        assert_eq!(settings.start_screen, Screen::Title);
        assert_eq!(settings.collision_params(), CollisionParams::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(
            r#"{ "collision": "sweep", "seed": 7, "start_screen": "play" }"#,
        )
        .unwrap();
        assert_eq!(settings.collision, CollisionStrategy::Sweep);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.start_screen, Screen::Play);
        assert_eq!(settings.play_width, PLAY_WIDTH);
        assert_eq!(settings.bullet_capacity, BULLET_CAPACITY);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = Settings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        let err = Settings::from_json_str(r#"{ "collision": "lasers" }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("definitely/not/here.json");
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            Settings::load_from("definitely/not/here.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_validated_repairs_nonsense() {
        let settings = Settings {
            play_width: 0.0,
            bullet_capacity: 0,
            asteroid_count_min: 9,
            asteroid_count_max: 3,
            asteroid_speed_scale_min: f32::NAN,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings.play_width, PLAY_WIDTH);
        assert_eq!(settings.bullet_capacity, BULLET_CAPACITY);
        assert_eq!((settings.asteroid_count_min, settings.asteroid_count_max), (3, 9));
        assert_eq!(settings.asteroid_speed_scale_min, ASTEROID_SPEED_SCALE_MIN);
    }

    #[test]
    fn test_round_trip_json() {
        let settings = Settings {
            seed: Some(123),
            collision: CollisionStrategy::PointInRect,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"point_in_rect\""));
        assert_eq!(Settings::from_json_str(&json).unwrap(), settings);
    }
}
