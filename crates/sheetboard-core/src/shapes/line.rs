//! Straight line stroke.

use super::{ShapeTrait, StrokeId, StrokeStyle};
use crate::geometry::point_to_segment_dist;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line segment between two anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: StrokeId,
    /// Anchor where the gesture started.
    pub p1: Point,
    /// Anchor where the gesture ended.
    pub p2: Point,
    /// Style properties.
    pub style: StrokeStyle,
}

impl Line {
    pub fn new(p1: Point, p2: Point, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            style,
        }
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).hypot()
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> StrokeId {
        self.id
    }

    fn defining_points(&self) -> Vec<Point> {
        vec![self.p1, self.p2]
    }

    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        point_to_segment_dist(point, self.p1, self.p2) < threshold
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.p1);
        path.line_to(self.p2);
        path
    }

    fn style(&self) -> &StrokeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }
}
