//! Room Configuration
//!
//! Everything the viewer can tune without recompiling, loaded from JSON.
//! Missing fields fall back to `Default`, so `{}` is a valid config.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_EYE_HEIGHT;
use crate::physics::{Aabb, StaticObstacles};
use crate::player::MovementConfig;
use crate::runtime::DEFAULT_MAX_DELTA;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading a room config.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// Parsed fine but a value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid room config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Window setup for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Listening Room".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub window: WindowConfig,
    pub movement: MovementConfig,
    /// Radians of camera rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Longest frame delta fed to the integrator, in seconds
    pub max_frame_delta: f32,
    /// Where the camera starts
    pub spawn: Vec3,
    /// Static room geometry; empty means walk anywhere
    pub obstacles: StaticObstacles,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            movement: MovementConfig::default(),
            mouse_sensitivity: 0.002,
            max_frame_delta: DEFAULT_MAX_DELTA,
            spawn: Vec3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0),
            obstacles: StaticObstacles::empty(),
        }
    }
}

impl RoomConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!(
            "loaded room config from {} ({} obstacles)",
            path.display(),
            config.obstacles.len()
        );
        Ok(config)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: RoomConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the integrator or clock cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("movement.friction", self.movement.friction),
            ("movement.acceleration", self.movement.acceleration),
            ("movement.eye_height", self.movement.eye_height),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        // Past 1 the friction step overshoots zero and flips the velocity
        let friction_step = self.movement.friction * self.max_frame_delta;
        if friction_step > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "movement.friction * max_frame_delta must be at most 1, got {} * {} = {}",
                self.movement.friction, self.max_frame_delta, friction_step
            )));
        }

        let size = self.movement.player_size;
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "movement.player_size must be positive, got {size:?}"
            )));
        }

        if !self.spawn.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "spawn must be finite, got {:?}",
                self.spawn
            )));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }

        Ok(())
    }

    /// Obstacles that contain the spawn point. The player would be stuck there.
    pub fn obstacles_at_spawn(&self) -> Vec<Aabb> {
        let player = Aabb::from_center_and_size(self.spawn, self.movement.player_size);
        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.intersects(&player))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = RoomConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RoomConfig::default());
        assert!(config.obstacles.is_empty());
        assert_eq!(config.spawn, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_partial_movement_override() {
        let config =
            RoomConfig::from_json_str(r#"{ "movement": { "friction": 4.0 } }"#).unwrap();
        assert_eq!(config.movement.friction, 4.0);
        assert_eq!(config.movement.acceleration, 50.0);
    }

    #[test]
    fn test_obstacles_parse() {
        let config = RoomConfig::from_json_str(
            r#"{ "obstacles": [ { "min": [-2.5, 0.0, -5.5], "max": [2.5, 3.0, -4.5] } ] }"#,
        )
        .unwrap();
        assert_eq!(config.obstacles.len(), 1);
        assert!(config.obstacles_at_spawn().is_empty());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = RoomConfig::default();
        config.window.title = "Room".to_string();
        config.obstacles.push(Aabb::new(Vec3::ZERO, Vec3::ONE));

        let text = config.to_json_string().unwrap();
        assert_eq!(RoomConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn test_negative_friction_rejected() {
        let err = RoomConfig::from_json_str(r#"{ "movement": { "friction": -1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("movement.friction"));
    }

    #[test]
    fn test_friction_overshoot_rejected() {
        let err = RoomConfig::from_json_str(
            r#"{ "movement": { "friction": 10.0 }, "max_frame_delta": 0.3 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let message = err.to_string();
        assert!(message.contains("movement.friction"));
        assert!(message.contains("max_frame_delta"));

        // Lower friction makes the same hitch cap usable
        assert!(
            RoomConfig::from_json_str(
                r#"{ "movement": { "friction": 3.0 }, "max_frame_delta": 0.3 }"#
            )
            .is_ok()
        );
    }

    #[test]
    fn test_default_config_validates() {
        assert!(RoomConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_obstacle_still_blocks() {
        let config = RoomConfig::from_json_str(
            r#"{ "obstacles": [ { "min": [2.5, 3.0, -4.5], "max": [-2.5, 0.0, -5.5] } ] }"#,
        )
        .unwrap();
        let player =
            Aabb::from_center_and_size(Vec3::new(0.0, 1.6, -5.0), config.movement.player_size);
        assert!(config.obstacles.iter().any(|wall| wall.intersects(&player)));
    }

    #[test]
    fn test_zero_player_size_rejected() {
        let err = RoomConfig::from_json_str(
            r#"{ "movement": { "player_size": [0.5, 0.0, 0.5] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = RoomConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RoomConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_obstacle_at_spawn_detected() {
        let mut config = RoomConfig::default();
        config
            .obstacles
            .push(Aabb::from_center_and_size(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE));
        assert_eq!(config.obstacles_at_spawn().len(), 1);
    }
}
