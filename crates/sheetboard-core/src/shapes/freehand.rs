//! Freehand drawing stroke.

use super::{ShapeTrait, StrokeId, StrokeStyle};
use crate::geometry::{bounds_of, point_to_polyline_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand drawing (series of points).
///
/// Always holds at least one point: the position where the pen went down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: StrokeId,
    /// Points in the freehand path.
    points: Vec<Point>,
    /// Style properties.
    pub style: StrokeStyle,
}

impl Freehand {
    /// Start a new path at `first`.
    pub fn new(first: Point, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![first],
            style,
        }
    }

    /// Create from existing points; `None` when `points` is empty.
    pub fn from_points(points: Vec<Point>, style: StrokeStyle) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            points,
            style,
        })
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The most recent segment, if the path has at least two points.
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> StrokeId {
        self.id
    }

    fn defining_points(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        point_to_polyline_dist(point, &self.points) < threshold
    }

    fn bounds(&self) -> Rect {
        bounds_of(self.points.iter().copied()).unwrap_or(Rect::ZERO)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };
        path.move_to(*first);
        if rest.is_empty() {
            // Zero-length segment so a single tap still leaves a round dot.
            path.line_to(*first);
        }
        for point in rest {
            path.line_to(*point);
        }
        path
    }

    fn style(&self) -> &StrokeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}
