//! Rectangle stroke.

use super::{ShapeTrait, StrokeId, StrokeStyle};
use crate::geometry::{point_to_segment_dist, rect_edges};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle outline spanning two anchors.
///
/// The anchors may sit in any pair of opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: StrokeId,
    /// Anchor where the gesture started.
    pub p1: Point,
    /// Anchor where the gesture ended.
    pub p2: Point,
    /// Style properties.
    pub style: StrokeStyle,
}

impl Rectangle {
    pub fn new(p1: Point, p2: Point, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            style,
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> StrokeId {
        self.id
    }

    fn defining_points(&self) -> Vec<Point> {
        vec![self.p1, self.p2]
    }

    /// Outline only: points deep inside the rectangle do not hit.
    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        rect_edges(self.p1, self.p2)
            .iter()
            .any(|&(a, b)| point_to_segment_dist(point, a, b) < threshold)
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.p1);
        for (_, to) in rect_edges(self.p1, self.p2) {
            path.line_to(to);
        }
        path.close_path();
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
