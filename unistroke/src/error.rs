use thiserror::Error;

/// Why a stroke could not be normalized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    #[error("stroke needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("stroke has zero path length")]
    ZeroLength,

    #[error("stroke contains a NaN or infinite coordinate")]
    NonFinite,

    #[error("stroke bounding box is degenerate ({width} x {height})")]
    DegenerateBoundingBox { width: f64, height: f64 },
}

/// Rejected recognizer configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("num_points must be at least 2, got {0}")]
    TooFewResamplePoints(usize),

    #[error("square_size must be positive and finite, got {0}")]
    InvalidSquareSize(f64),

    #[error("min_extent must be positive and finite, got {0}")]
    InvalidMinExtent(f64),
}

/// Failure while building a recognizer from a config and an initial library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("gesture '{name}': {source}")]
    Gesture { name: String, source: StrokeError },
}

pub type Result<T> = std::result::Result<T, StrokeError>;
