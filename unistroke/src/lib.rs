extern crate wasm_bindgen;
extern crate serde_derive;

mod clock;
mod config;
mod error;
mod geometry;
mod match_collector;
mod matcher;
mod normalizer;
mod template;

use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub use config::{DegeneratePolicy, RecognizerConfig, DEFAULT_MIN_EXTENT, DEFAULT_NUM_POINTS, DEFAULT_SQUARE_SIZE};
pub use error::{BuildError, ConfigError, StrokeError};
pub use geometry::{bounding_box, centroid, distance, path_length, Rect};
pub use matcher::{optimal_cosine_distance, Recognizer, NO_MATCH};
pub use normalizer::{indicative_angle, normalize, resample, rotate_by, scale_to, translate_to, vectorize};
pub use template::{GestureDefinition, Template};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Outcome of one recognition. `time` is the scan's wall time in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Match<C = ()> {
    pub name: String,
    pub score: f64,
    pub time: u64,
    #[serde(rename = "onComplete", skip_serializing_if = "Option::is_none", default)]
    pub on_complete: Option<C>,
}

// JS side: the callback handle is a string key the page maps to an action
thread_local!(static RECOGNIZER: RefCell<Recognizer<String>> = RefCell::new(Recognizer::default()));

// Points come from JS as [[x, y], ...]
#[allow(deprecated)]
fn points_from_js(input: &JsValue) -> std::result::Result<Vec<Point>, JsValue> {
    let raw: Vec<Vec<f64>> = input.into_serde().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut points: Vec<Point> = Vec::with_capacity(raw.len());
    for pt in &raw {
        if pt.len() < 2 {
            return Err(JsValue::from_str("every point needs an x and a y coordinate"));
        }
        points.push(Point { x: pt[0], y: pt[1] });
    }
    Ok(points)
}

fn to_js_error<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(js_name = addGesture)]
pub fn add_gesture(name: &str, input: &JsValue, callback: Option<String>) -> std::result::Result<usize, JsValue> {
    let points = points_from_js(input)?;
    RECOGNIZER.with(|recognizer| recognizer.borrow_mut().add_gesture_with(name, &points, callback).map_err(to_js_error))
}

#[wasm_bindgen(js_name = removeGesture)]
pub fn remove_gesture(name: &str) -> usize {
    RECOGNIZER.with(|recognizer| recognizer.borrow_mut().remove_gesture(name))
}

/// Best match as a JSON string.
#[wasm_bindgen]
pub fn recognize(input: &JsValue) -> std::result::Result<String, JsValue> {
    let points = points_from_js(input)?;
    let res = RECOGNIZER.with(|recognizer| recognizer.borrow().recognize(&points)).map_err(to_js_error)?;
    serde_json::to_string(&res).map_err(to_js_error)
}

/// Up to `limit` ranked matches as a JSON array string.
#[wasm_bindgen(js_name = recognizeTop)]
pub fn recognize_top(input: &JsValue, limit: usize) -> std::result::Result<String, JsValue> {
    let points = points_from_js(input)?;
    let res = RECOGNIZER.with(|recognizer| recognizer.borrow().recognize_top(&points, limit)).map_err(to_js_error)?;
    serde_json::to_string(&res).map_err(to_js_error)
}
