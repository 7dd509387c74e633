//! Pure geometric tests used by the eraser and the lasso.

use kurbo::{Point, Rect, Vec2};

/// Distance within which a pointer position hits a stroke.
pub const DEFAULT_HIT_THRESHOLD: f64 = 8.0;

/// Distance from a point to a finite line segment (a→b).
///
/// The projection of `point` onto the segment is clamped to its endpoints, so
/// a zero-length segment yields the distance to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Fewer than two points form no segment, so the result is infinite.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Ray-casting parity test.
///
/// The polygon is closed implicitly between its last and first vertex.
/// Fewer than three vertices enclose nothing.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// The four edges of the axis-aligned rectangle spanned by two anchors,
/// in drawing order starting at `p1`.
pub fn rect_edges(p1: Point, p2: Point) -> [(Point, Point); 4] {
    let c1 = Point::new(p2.x, p1.y);
    let c3 = Point::new(p1.x, p2.y);
    [(p1, c1), (c1, p2), (p2, c3), (c3, p1)]
}

/// Axis-aligned bounds of a set of points, `None` when empty.
pub fn bounds_of(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// Vertex average of a polygon.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f64).to_point())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_degenerate_segment_is_point_distance() {
        let a = Point::new(3.0, 4.0);
        for p in [Point::ZERO, Point::new(-7.0, 2.5), Point::new(3.0, 4.0)] {
            let expected = (p - a).hypot();
            assert!((point_to_segment_dist(p, a, a) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_distance_zero_on_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        assert!(point_to_segment_dist(Point::new(5.0, 5.0), a, b) < 1e-12);
        assert!(point_to_segment_dist(a, a, b) < 1e-12);
        assert!(point_to_segment_dist(b, a, b) < 1e-12);
    }

    #[test]
    fn test_distance_positive_off_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        // Collinear but beyond the end
        assert!((point_to_segment_dist(Point::new(13.0, 0.0), a, b) - 3.0).abs() < 1e-12);
        // Perpendicular
        assert!((point_to_segment_dist(Point::new(5.0, 4.0), a, b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!((point_to_polyline_dist(Point::new(12.0, 5.0), &pts) - 2.0).abs() < 1e-12);
        assert!(point_to_polyline_dist(Point::new(0.0, 0.0), &pts[..1]).is_infinite());
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
    }

    #[test]
    fn test_point_in_square() {
        let poly = square();
        assert!(point_in_polygon(Point::new(5.0, 5.0), &poly));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &poly));
        assert!(!point_in_polygon(Point::new(5.0, -0.5), &poly));
        assert!(!point_in_polygon(Point::new(-100.0, 100.0), &poly));
    }

    #[test]
    fn test_centroid_inside_convex_polygons() {
        let polys = [
            square(),
            vec![Point::new(0.0, 0.0), Point::new(40.0, 5.0), Point::new(20.0, 30.0)],
            (0..7)
                .map(|i| {
                    let a = i as f64 * std::f64::consts::TAU / 7.0;
                    Point::new(50.0 + 20.0 * a.cos(), 50.0 + 20.0 * a.sin())
                })
                .collect(),
        ];
        for poly in &polys {
            let c = centroid(poly).unwrap();
            assert!(point_in_polygon(c, poly));
        }
    }

    #[test]
    fn test_outside_bounding_box_is_outside() {
        let poly = vec![Point::new(0.0, 0.0), Point::new(40.0, 5.0), Point::new(20.0, 30.0)];
        let bounds = bounds_of(poly.iter().copied()).unwrap();
        for p in [
            Point::new(bounds.x0 - 1.0, 10.0),
            Point::new(bounds.x1 + 1.0, 10.0),
            Point::new(10.0, bounds.y0 - 1.0),
            Point::new(10.0, bounds.y1 + 1.0),
        ] {
            assert!(!point_in_polygon(p, &poly));
        }
    }

    #[test]
    fn test_too_few_vertices() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &line));
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_rect_edges_any_corner_order() {
        let edges = rect_edges(Point::new(50.0, 40.0), Point::new(10.0, 10.0));
        let bounds = bounds_of(edges.iter().flat_map(|(a, b)| [*a, *b])).unwrap();
        assert_eq!(bounds, Rect::new(10.0, 10.0, 50.0, 40.0));
    }
}
