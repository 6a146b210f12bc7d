use serde_derive::{Deserialize, Serialize};

use super::config::RecognizerConfig;
use super::error::Result;
use super::normalizer::normalize;
use super::Point;

/// A named gesture as callers store it: just the raw points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GestureDefinition {
    pub name: String,
    pub points: Vec<Point>,
}

// One normalized gesture. Never mutated after construction;
// replacing a gesture means remove, then add.
#[derive(Debug, Clone)]
pub struct Template<C = ()> {
    name: String,
    original_points: Vec<Point>,
    vector: Vec<f64>,
    on_complete: Option<C>,
}

impl<C> Template<C> {
    pub fn new(name: &str, points: &[Point], on_complete: Option<C>, config: &RecognizerConfig) -> Result<Template<C>> {
        let vector = normalize(points, config)?;
        Ok(Template {
            name: name.to_string(),
            original_points: points.to_vec(),
            vector: vector,
            on_complete: on_complete,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_points(&self) -> &[Point] {
        &self.original_points
    }

    /// Unit vector of length `2 * num_points`.
    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn on_complete(&self) -> Option<&C> {
        self.on_complete.as_ref()
    }
}
