use serde_derive::{Deserialize, Serialize};

use super::error::ConfigError;
use super::Point;

pub const DEFAULT_NUM_POINTS: usize = 64;
pub const DEFAULT_SQUARE_SIZE: f64 = 250.0;
pub const DEFAULT_MIN_EXTENT: f64 = 1e-6;

/// What to do when a rotated stroke has (near) zero width or height.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Substitute `min_extent` for the offending extent.
    Clamp,
    /// Fail with `StrokeError::DegenerateBoundingBox`.
    Reject,
}

/// Normalization parameters. Templates and queries of one recognizer always
/// share the same instance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    pub num_points: usize,
    pub square_size: f64,
    pub origin: Point,
    pub degenerate: DegeneratePolicy,
    pub min_extent: f64,
}

impl Default for RecognizerConfig {
    fn default() -> RecognizerConfig {
        RecognizerConfig {
            num_points: DEFAULT_NUM_POINTS,
            square_size: DEFAULT_SQUARE_SIZE,
            origin: Point { x: 0.0, y: 0.0 },
            degenerate: DegeneratePolicy::Clamp,
            min_extent: DEFAULT_MIN_EXTENT,
        }
    }
}

impl RecognizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_points < 2 {
            return Err(ConfigError::TooFewResamplePoints(self.num_points));
        }
        if !self.square_size.is_finite() || self.square_size <= 0.0 {
            return Err(ConfigError::InvalidSquareSize(self.square_size));
        }
        if !self.min_extent.is_finite() || self.min_extent <= 0.0 {
            return Err(ConfigError::InvalidMinExtent(self.min_extent));
        }
        Ok(())
    }
}
