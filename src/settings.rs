//! Physics tuning for the tick driver
//!
//! Loaded from JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Player physics and step size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Longest sub-step a frame is split into (seconds)
    pub max_step: f64,
    /// Downward acceleration on the player (cells/s²)
    pub gravity: f64,
    /// Upward speed given by a jump (cells/s)
    pub jump_speed: f64,
    /// Horizontal run speed (cells/s)
    pub player_x_speed: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_step: MAX_STEP,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            player_x_speed: PLAYER_X_SPEED,
        }
    }
}

impl Tuning {
    /// Strict parse: malformed JSON is an error
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Sub-steps must make progress
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        Ok(())
    }

    /// Read a tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults if it is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::info!("Using default tuning ({}: {e})", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuning = Tuning::default();
        assert_eq!(tuning.max_step, 0.05);
        assert_eq!(tuning.gravity, 30.0);
        assert_eq!(tuning.jump_speed, 17.0);
        assert_eq!(tuning.player_x_speed, 7.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"gravity": 12.5}"#).unwrap();
        assert_eq!(tuning.gravity, 12.5);
        assert_eq!(tuning.jump_speed, 17.0);
    }

    #[test]
    fn test_rejects_bad_json_and_step() {
        assert!(matches!(Tuning::from_json("{"), Err(SimError::Config(_))));
        assert!(matches!(
            Tuning::from_json(r#"{"max_step": 0}"#),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_stalled_step() {
        assert!(Tuning::default().validate().is_ok());
        for max_step in [0.0, -0.05, f64::NAN] {
            let tuning = Tuning {
                max_step,
                ..Default::default()
            };
            assert!(matches!(tuning.validate(), Err(SimError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load("/nonexistent/lavafall-tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
