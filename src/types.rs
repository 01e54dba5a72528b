use serde::{Deserialize, Serialize};

/// Coordinates closer than this are treated as the same joint
pub const COORD_TOLERANCE: f64 = 1e-6;

/// A point in the truss plane (inches)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Reflection across the vertical line `x = span / 2`
    pub fn mirrored(&self, span: f64) -> Point {
        Point::new(span - self.x, self.y)
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < COORD_TOLERANCE && (self.y - other.y).abs() < COORD_TOLERANCE
    }

    /// Integer key used to deduplicate joints within `COORD_TOLERANCE`
    pub fn key(&self) -> (i64, i64) {
        (
            (self.x / COORD_TOLERANCE).round() as i64,
            (self.y / COORD_TOLERANCE).round() as i64,
        )
    }
}

/// A candidate member: a straight bar between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn mirrored(&self, span: f64) -> Segment {
        Segment::new(self.start.mirrored(span), self.end.mirrored(span))
    }
}
