use tracing::warn;

use super::config::{DegeneratePolicy, RecognizerConfig};
use super::error::{Result, StrokeError};
use super::geometry::*;
use super::Point;

// Checks the preconditions every later stage relies on.
// Returns the stroke's path length.
pub fn validate(points: &[Point]) -> Result<f64> {
    if points.len() < 2 {
        warn!(count = points.len(), "rejecting stroke with too few points");
        return Err(StrokeError::TooFewPoints { count: points.len() });
    }
    if points.iter().any(|pt| !pt.x.is_finite() || !pt.y.is_finite()) {
        warn!("rejecting stroke with non-finite coordinates");
        return Err(StrokeError::NonFinite);
    }
    let length = path_length(points);
    if !length.is_finite() || length <= 0.0 {
        warn!(length, "rejecting stroke with no usable path length");
        return Err(StrokeError::ZeroLength);
    }
    Ok(length)
}

/// Resamples the stroke into exactly `n` points spaced evenly along its arc.
/// `n` below 2 is treated as 2.
pub fn resample(points: &[Point], n: usize) -> Result<Vec<Point>> {
    let length = validate(points)?;
    let n = n.max(2);
    let interval = length / (n - 1) as f64;
    let mut res: Vec<Point> = Vec::with_capacity(n);
    res.push(points[0]);

    // `prev` stands in for an interpolated point inserted before points[i],
    // so the next segment is measured from it rather than from the vertex.
    let mut prev = points[0];
    let mut acc = 0f64;
    let mut i = 1;
    while i < points.len() && res.len() < n {
        let cur = points[i];
        let d = distance(prev, cur);
        if acc + d >= interval && d > 0.0 {
            let t = (interval - acc) / d;
            let q = Point {
                x: prev.x + t * (cur.x - prev.x),
                y: prev.y + t * (cur.y - prev.y),
            };
            res.push(q);
            prev = q;
            acc = 0.0;
        } else {
            acc += d;
            prev = cur;
            i += 1;
        }
    }

    // Rounding can leave the last point unemitted
    let last = points[points.len() - 1];
    while res.len() < n {
        res.push(last);
    }
    Ok(res)
}

// Angle from the first point to the centroid
pub fn indicative_angle(points: &[Point]) -> f64 {
    let c = centroid(points);
    (c.y - points[0].y).atan2(c.x - points[0].x)
}

// Rotates every point about the centroid
pub fn rotate_by(points: &[Point], radians: f64) -> Vec<Point> {
    let c = centroid(points);
    let (sin, cos) = radians.sin_cos();
    points
        .iter()
        .map(|pt| {
            let dx = pt.x - c.x;
            let dy = pt.y - c.y;
            Point {
                x: dx * cos - dy * sin + c.x,
                y: dx * sin + dy * cos + c.y,
            }
        })
        .collect()
}

/// Non-uniform scale so the bounding box becomes `size` x `size`.
/// Extents below `config.min_extent` are clamped or rejected per `config.degenerate`.
pub fn scale_to(points: &[Point], size: f64, config: &RecognizerConfig) -> Result<Vec<Point>> {
    let rect = bounding_box(points);
    let mut w = rect.w;
    let mut h = rect.h;
    if w < config.min_extent || h < config.min_extent {
        match config.degenerate {
            DegeneratePolicy::Reject => {
                warn!(width = w, height = h, "rejecting stroke with degenerate bounding box");
                return Err(StrokeError::DegenerateBoundingBox { width: w, height: h });
            }
            DegeneratePolicy::Clamp => {
                w = w.max(config.min_extent);
                h = h.max(config.min_extent);
            }
        }
    }
    let sx = size / w;
    let sy = size / h;
    Ok(points.iter().map(|pt| Point { x: pt.x * sx, y: pt.y * sy }).collect())
}

// Moves the centroid onto `dest`
pub fn translate_to(points: &[Point], dest: Point) -> Vec<Point> {
    let c = centroid(points);
    let dx = dest.x - c.x;
    let dy = dest.y - c.y;
    points.iter().map(|pt| Point { x: pt.x + dx, y: pt.y + dy }).collect()
}

/// Flattens to `[x0, y0, x1, y1, ...]` and divides by the Euclidean norm.
pub fn vectorize(points: &[Point]) -> Result<Vec<f64>> {
    let mut res: Vec<f64> = Vec::with_capacity(points.len() * 2);
    let mut sum = 0f64;
    for pt in points {
        res.push(pt.x);
        res.push(pt.y);
        sum += pt.x * pt.x + pt.y * pt.y;
    }
    let magnitude = sum.sqrt();
    if !magnitude.is_finite() || magnitude == 0.0 {
        return Err(StrokeError::ZeroLength);
    }
    for v in res.iter_mut() {
        *v /= magnitude;
    }
    Ok(res)
}

/// Full pipeline: resample, rotate, scale, translate, vectorize.
/// Rotation has to come before the non-uniform scale.
pub fn normalize(points: &[Point], config: &RecognizerConfig) -> Result<Vec<f64>> {
    let resampled = resample(points, config.num_points)?;
    let radians = indicative_angle(&resampled);
    let rotated = rotate_by(&resampled, -radians);
    let scaled = scale_to(&rotated, config.square_size, config)?;
    let translated = translate_to(&scaled, config.origin);
    vectorize(&translated)
}
