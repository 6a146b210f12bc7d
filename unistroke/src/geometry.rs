use super::Point;

/// Axis-aligned bounding box: min corner plus extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

// Gets distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

// Sum of consecutive point-to-point distances
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

// Arithmetic mean of all points; caller guarantees the slice is not empty
pub fn centroid(points: &[Point]) -> Point {
    let mut x = 0f64;
    let mut y = 0f64;
    for pt in points {
        x += pt.x;
        y += pt.y;
    }
    let n = points.len() as f64;
    Point { x: x / n, y: y / n }
}

pub fn bounding_box(points: &[Point]) -> Rect {
    let mut left = std::f64::MAX;
    let mut right = std::f64::MIN;
    let mut top = std::f64::MAX;
    let mut bottom = std::f64::MIN;
    for pt in points {
        if pt.x < left { left = pt.x; }
        if pt.x > right { right = pt.x; }
        if pt.y < top { top = pt.y; }
        if pt.y > bottom { bottom = pt.y; }
    }
    Rect {
        x: left,
        y: top,
        w: right - left,
        h: bottom - top,
    }
}
