//! Circle stroke.

use super::{ShapeTrait, StrokeId, StrokeStyle};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle centered on `p1` passing through `p2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: StrokeId,
    /// Center.
    pub p1: Point,
    /// A point on the circumference.
    pub p2: Point,
    /// Style properties.
    pub style: StrokeStyle,
}

impl Circle {
    pub fn new(p1: Point, p2: Point, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            style,
        }
    }

    pub fn center(&self) -> Point {
        self.p1
    }

    pub fn radius(&self) -> f64 {
        (self.p2 - self.p1).hypot()
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center(), self.radius())
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> StrokeId {
        self.id
    }

    fn defining_points(&self) -> Vec<Point> {
        vec![self.p1, self.p2]
    }

    /// Near the circumference only; the interior does not hit.
    fn hit_test(&self, point: Point, threshold: f64) -> bool {
        ((point - self.center()).hypot() - self.radius()).abs() < threshold
    }

    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(self.p1.x - r, self.p1.y - r, self.p1.x + r, self.p1.y + r)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &StrokeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }
}
