use crate::config::GridConfig;
use crate::types::{Point, Segment};

/// Every member that may appear in the left half of a design.
///
/// Grid points cover `0 <= x <= span / 2` and `0 <= y <= height`. Points are
/// enumerated column by column (x outer, y inner), and a candidate member
/// exists for every unordered pair of distinct points. A genome holds one bit
/// per candidate member, in this order.
#[derive(Debug, Clone)]
pub struct CandidateGrid {
    span: f64,
    height: f64,
    points: Vec<Point>,
    members: Vec<Segment>,
}

impl CandidateGrid {
    pub fn new(config: &GridConfig) -> Self {
        let half_span = config.span / 2.0;

        let mut points =
            Vec::with_capacity((config.half_divisions_x + 1) * (config.divisions_y + 1));
        for i in 0..=config.half_divisions_x {
            // Divide last so the final column lands exactly on the centerline
            let x = half_span * i as f64 / config.half_divisions_x as f64;
            for j in 0..=config.divisions_y {
                let y = config.height * j as f64 / config.divisions_y as f64;
                points.push(Point::new(x, y));
            }
        }

        let mut members = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);
        for a in 0..points.len() {
            for b in (a + 1)..points.len() {
                members.push(Segment::new(points[a], points[b]));
            }
        }

        Self {
            span: config.span,
            height: config.height,
            points,
            members,
        }
    }

    /// Number of candidate member slots, which is also the genome length
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn members(&self) -> &[Segment] {
        &self.members
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    /// Where the unit load is applied: top of the centerline
    pub fn load_point(&self) -> Point {
        Point::new(self.span / 2.0, self.height)
    }

    /// Hinged supports at the two base corners
    pub fn support_points(&self) -> [Point; 2] {
        [Point::new(0.0, 0.0), Point::new(self.span, 0.0)]
    }

    /// Slot index of the member joining `a` and `b`, in either direction
    pub fn position_of(&self, a: Point, b: Point) -> Option<usize> {
        self.members.iter().position(|m| {
            (m.start.approx_eq(&a) && m.end.approx_eq(&b))
                || (m.start.approx_eq(&b) && m.end.approx_eq(&a))
        })
    }
}
