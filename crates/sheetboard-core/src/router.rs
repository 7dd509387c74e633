//! Gesture state machine mapping pointer events to canvas edits.
//!
//! The router never draws. Each dispatch returns a [`Repaint`] telling the
//! shell how much of the surface is stale.

use crate::canvas::Canvas;
use crate::input::PointerEvent;
use crate::shapes::{Freehand, Stroke, StrokeId, StrokeKind, StrokeStyle};
use crate::tools::ToolKind;
use kurbo::Point;

/// State of the gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No button or touch held.
    #[default]
    Idle,
    /// Pen held; points extend the stroke already appended to the sheet.
    Freehand { stroke: StrokeId },
    /// Eraser held; every move erases.
    Erasing,
    /// Shape tool held; the shape is built on release.
    Shape { kind: StrokeKind, anchor: Point },
    /// Lasso held with no selection; collecting the polygon.
    LassoCollecting { polygon: Vec<Point> },
    /// Lasso held over an existing selection; moves drag it.
    LassoDragging { last: Point },
}

/// What the surface needs after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Repaint {
    /// Nothing changed on screen.
    None,
    /// Draw one new freehand segment on top of the current raster.
    Segment {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
    /// Clear and redraw the active sheet.
    Full,
    /// Full redraw plus the in-progress lasso polygon as a dashed overlay.
    FullWithLasso,
}

/// Drives [`Gesture`] transitions from pointer events.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    gesture: Gesture,
    /// Last resolved pointer position, used when a touch-end carries no touches.
    last_position: Option<Point>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// The lasso polygon being collected, if any.
    pub fn lasso_polygon(&self) -> Option<&[Point]> {
        match &self.gesture {
            Gesture::LassoCollecting { polygon } => Some(polygon),
            _ => None,
        }
    }

    /// Handle one pointer event.
    pub fn dispatch(&mut self, canvas: &mut Canvas, event: &PointerEvent) -> Repaint {
        let resolved = event.source().position(canvas.surface_origin);
        let Some(position) = resolved.or(self.last_position) else {
            log::warn!("Pointer event without a position and no previous sample; ignored");
            if matches!(event, PointerEvent::Up(_)) {
                self.gesture = Gesture::Idle;
            }
            return Repaint::None;
        };
        self.last_position = Some(position);

        match event {
            PointerEvent::Down(_) => self.pointer_down(canvas, position),
            PointerEvent::Move(_) => self.pointer_move(canvas, position),
            PointerEvent::Up(_) => self.pointer_up(canvas, position),
        }
    }

    /// Abandon the gesture in progress.
    ///
    /// A partially drawn freehand stroke stays on the sheet; a lasso polygon
    /// is discarded.
    pub fn cancel(&mut self) -> Repaint {
        match std::mem::take(&mut self.gesture) {
            Gesture::LassoCollecting { .. } => Repaint::Full,
            _ => Repaint::None,
        }
    }

    fn pointer_down(&mut self, canvas: &mut Canvas, position: Point) -> Repaint {
        let tool = canvas.tool_manager.current_tool;
        let style = canvas.tool_manager.current_style;
        log::debug!("{} down at ({:.1}, {:.1})", tool.name(), position.x, position.y);

        let (gesture, repaint) = match tool {
            ToolKind::Pen => {
                let freehand = Freehand::new(position, style);
                let id = freehand.id;
                canvas.add_stroke(Stroke::Freehand(freehand));
                (Gesture::Freehand { stroke: id }, Repaint::None)
            }
            ToolKind::Eraser => (Gesture::Erasing, Repaint::None),
            ToolKind::Line | ToolKind::Rect | ToolKind::Circle => {
                let gesture = tool
                    .shape_kind()
                    .map(|kind| Gesture::Shape {
                        kind,
                        anchor: position,
                    })
                    .unwrap_or_default();
                (gesture, Repaint::None)
            }
            ToolKind::Lasso if !canvas.selection.is_empty() => {
                (Gesture::LassoDragging { last: position }, Repaint::None)
            }
            ToolKind::Lasso => {
                canvas.cancel_selection();
                (
                    Gesture::LassoCollecting {
                        polygon: vec![position],
                    },
                    Repaint::FullWithLasso,
                )
            }
        };
        self.gesture = gesture;
        repaint
    }

    fn pointer_move(&mut self, canvas: &mut Canvas, position: Point) -> Repaint {
        match &mut self.gesture {
            Gesture::Idle | Gesture::Shape { .. } => Repaint::None,
            Gesture::Freehand { stroke } => {
                let id = *stroke;
                let Some(freehand) = canvas
                    .document
                    .active_sheet_mut()
                    .get_mut(id)
                    .and_then(Stroke::as_freehand_mut)
                else {
                    self.gesture = Gesture::Idle;
                    return Repaint::None;
                };
                freehand.add_point(position);
                match freehand.last_segment() {
                    Some((from, to)) => Repaint::Segment {
                        from,
                        to,
                        style: freehand.style,
                    },
                    None => Repaint::None,
                }
            }
            Gesture::Erasing => {
                if canvas.erase_at(position) > 0 {
                    Repaint::Full
                } else {
                    Repaint::None
                }
            }
            Gesture::LassoCollecting { polygon } => {
                polygon.push(position);
                Repaint::FullWithLasso
            }
            Gesture::LassoDragging { last } => {
                let delta = position - *last;
                *last = position;
                canvas.translate_selection(delta);
                Repaint::Full
            }
        }
    }

    fn pointer_up(&mut self, canvas: &mut Canvas, position: Point) -> Repaint {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Freehand { .. } | Gesture::Erasing => Repaint::None,
            Gesture::Shape { kind, anchor } => {
                let style = canvas.tool_manager.current_style;
                match Stroke::shape(kind, anchor, position, style) {
                    Some(stroke) => {
                        log::debug!("Materialized {:?} from {:?} to {:?}", kind, anchor, position);
                        canvas.add_stroke(stroke);
                        Repaint::Full
                    }
                    None => Repaint::None,
                }
            }
            Gesture::LassoCollecting { mut polygon } => {
                if polygon.last() != Some(&position) {
                    polygon.push(position);
                }
                canvas.select_with_lasso(&polygon);
                Repaint::Full
            }
            Gesture::LassoDragging { last } => {
                let delta = position - last;
                if delta.hypot2() > 0.0 {
                    canvas.translate_selection(delta);
                    Repaint::Full
                } else {
                    Repaint::None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerSource;
    use kurbo::Rect;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down(PointerSource::mouse(x, y))
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move(PointerSource::mouse(x, y))
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up(PointerSource::mouse(x, y))
    }

    fn run(router: &mut InputRouter, canvas: &mut Canvas, events: &[PointerEvent]) -> Vec<Repaint> {
        events.iter().map(|e| router.dispatch(canvas, e)).collect()
    }

    fn lasso_square(router: &mut InputRouter, canvas: &mut Canvas) {
        canvas.set_tool(ToolKind::Lasso);
        run(
            router,
            canvas,
            &[down(0.0, 0.0), mv(10.0, 0.0), mv(10.0, 10.0), mv(0.0, 10.0), up(0.0, 10.0)],
        );
    }

    #[test]
    fn test_pen_appends_immediately_and_draws_segments() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();

        // The press appends the stroke but paints nothing until the first move
        assert_eq!(router.dispatch(&mut canvas, &down(1.0, 1.0)), Repaint::None);
        assert_eq!(canvas.active_strokes().len(), 1);

        let repaint = router.dispatch(&mut canvas, &mv(5.0, 1.0));
        match repaint {
            Repaint::Segment { from, to, .. } => {
                assert_eq!(from, Point::new(1.0, 1.0));
                assert_eq!(to, Point::new(5.0, 1.0));
            }
            other => panic!("expected segment, got {other:?}"),
        }

        assert_eq!(router.dispatch(&mut canvas, &up(5.0, 1.0)), Repaint::None);
        assert!(router.is_idle());
        let points = canvas.active_strokes()[0].defining_points();
        assert_eq!(points, vec![Point::new(1.0, 1.0), Point::new(5.0, 1.0)]);
    }

    #[test]
    fn test_pen_uses_style_at_creation_time() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        canvas.tool_manager.set_color_hex("#ff0000").unwrap();
        canvas.tool_manager.set_width(6.0);
        router.dispatch(&mut canvas, &down(1.0, 1.0));
        canvas.tool_manager.set_width(1.0);
        router.dispatch(&mut canvas, &mv(2.0, 2.0));
        let style = canvas.active_strokes()[0].style();
        assert!((style.width - 6.0).abs() < f64::EPSILON);
        assert_eq!(style.color.to_hex(), "#ff0000");
    }

    #[test]
    fn test_moves_without_button_do_nothing() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        assert_eq!(router.dispatch(&mut canvas, &mv(3.0, 3.0)), Repaint::None);
        assert!(canvas.active_strokes().is_empty());
    }

    #[test]
    fn test_rect_materializes_on_release() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        canvas.set_tool(ToolKind::Rect);

        let repaints = run(&mut router, &mut canvas, &[down(50.0, 40.0), mv(30.0, 30.0)]);
        assert_eq!(repaints, vec![Repaint::None, Repaint::None]);
        assert!(canvas.active_strokes().is_empty());

        assert_eq!(router.dispatch(&mut canvas, &up(10.0, 10.0)), Repaint::Full);
        let stroke = &canvas.active_strokes()[0];
        assert_eq!(stroke.kind(), StrokeKind::Rect);
        assert_eq!(stroke.bounds(), Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_eraser_erases_on_move_only() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        run(&mut router, &mut canvas, &[down(0.0, 0.0), mv(10.0, 0.0), up(10.0, 0.0)]);
        assert_eq!(canvas.active_strokes().len(), 1);

        canvas.set_tool(ToolKind::Eraser);
        assert_eq!(router.dispatch(&mut canvas, &down(5.0, 0.0)), Repaint::None);
        assert_eq!(canvas.active_strokes().len(), 1);
        assert_eq!(router.dispatch(&mut canvas, &mv(5.0, 50.0)), Repaint::None);
        assert_eq!(router.dispatch(&mut canvas, &mv(5.0, 1.0)), Repaint::Full);
        assert!(canvas.active_strokes().is_empty());
        router.dispatch(&mut canvas, &up(5.0, 1.0));
        assert!(router.is_idle());
    }

    #[test]
    fn test_eraser_hits_shape_outlines() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        for (tool, from, to) in [
            (ToolKind::Line, (0.0, 0.0), (40.0, 0.0)),
            (ToolKind::Rect, (60.0, 60.0), (100.0, 100.0)),
            (ToolKind::Circle, (200.0, 200.0), (230.0, 200.0)),
        ] {
            canvas.set_tool(tool);
            run(&mut router, &mut canvas, &[down(from.0, from.1), up(to.0, to.1)]);
        }
        let kinds = |canvas: &Canvas| canvas.active_strokes().iter().map(Stroke::kind).collect::<Vec<_>>();
        assert_eq!(kinds(&canvas), vec![StrokeKind::Line, StrokeKind::Rect, StrokeKind::Circle]);

        canvas.set_tool(ToolKind::Eraser);
        router.dispatch(&mut canvas, &down(500.0, 500.0));
        assert_eq!(router.dispatch(&mut canvas, &mv(20.0, 3.0)), Repaint::Full);
        assert_eq!(kinds(&canvas), vec![StrokeKind::Rect, StrokeKind::Circle]);

        // Interiors are not part of the outline
        assert_eq!(router.dispatch(&mut canvas, &mv(80.0, 80.0)), Repaint::None);
        assert_eq!(router.dispatch(&mut canvas, &mv(200.0, 200.0)), Repaint::None);

        assert_eq!(router.dispatch(&mut canvas, &mv(100.0, 80.0)), Repaint::Full);
        assert_eq!(kinds(&canvas), vec![StrokeKind::Circle]);
        assert_eq!(router.dispatch(&mut canvas, &mv(200.0, 231.0)), Repaint::Full);
        assert!(canvas.active_strokes().is_empty());
        router.dispatch(&mut canvas, &up(200.0, 231.0));
        assert!(router.is_idle());
    }

    #[test]
    fn test_erasing_selected_stroke_lets_lasso_collect_again() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        canvas.set_tool(ToolKind::Line);
        run(&mut router, &mut canvas, &[down(2.0, 5.0), up(8.0, 5.0)]);
        lasso_square(&mut router, &mut canvas);
        assert_eq!(canvas.selection.len(), 1);

        canvas.set_tool(ToolKind::Eraser);
        run(&mut router, &mut canvas, &[down(5.0, 5.0), mv(5.0, 6.0), up(5.0, 6.0)]);
        assert!(canvas.active_strokes().is_empty());
        assert!(canvas.selection.is_empty());

        canvas.set_tool(ToolKind::Lasso);
        assert_eq!(router.dispatch(&mut canvas, &down(1.0, 1.0)), Repaint::FullWithLasso);
        assert!(router.lasso_polygon().is_some());
    }

    #[test]
    fn test_deleting_selection_lets_lasso_collect_again() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        canvas.set_tool(ToolKind::Line);
        run(&mut router, &mut canvas, &[down(2.0, 5.0), up(8.0, 5.0)]);
        lasso_square(&mut router, &mut canvas);

        assert_eq!(canvas.delete_selected(), 1);
        assert!(canvas.selection.is_empty());
        router.dispatch(&mut canvas, &down(1.0, 1.0));
        assert!(router.lasso_polygon().is_some());
    }

    #[test]
    fn test_lasso_collects_selects_and_drags() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        run(&mut router, &mut canvas, &[down(5.0, 5.0), up(5.0, 5.0)]);
        run(&mut router, &mut canvas, &[down(100.0, 100.0), up(100.0, 100.0)]);

        canvas.set_tool(ToolKind::Lasso);
        assert_eq!(router.dispatch(&mut canvas, &down(0.0, 0.0)), Repaint::FullWithLasso);
        assert_eq!(router.dispatch(&mut canvas, &mv(10.0, 0.0)), Repaint::FullWithLasso);
        assert_eq!(router.lasso_polygon().map(<[Point]>::len), Some(2));
        run(&mut router, &mut canvas, &[mv(10.0, 10.0), mv(0.0, 10.0)]);
        assert_eq!(router.dispatch(&mut canvas, &up(0.0, 10.0)), Repaint::Full);
        assert!(router.lasso_polygon().is_none());
        assert_eq!(canvas.selection.len(), 1);

        // Selection exists, so the next lasso gesture drags it
        router.dispatch(&mut canvas, &down(50.0, 50.0));
        assert_eq!(router.gesture(), &Gesture::LassoDragging { last: Point::new(50.0, 50.0) });
        assert_eq!(router.dispatch(&mut canvas, &mv(53.0, 54.0)), Repaint::Full);
        router.dispatch(&mut canvas, &up(60.0, 60.0));
        assert!(router.is_idle());
        assert_eq!(canvas.selection.len(), 1);

        let moved = canvas.document.active_sheet().get(canvas.selection.ids()[0]).unwrap();
        assert_eq!(moved.defining_points(), vec![Point::new(15.0, 15.0)]);
        assert_eq!(
            canvas.active_strokes()[1].defining_points(),
            vec![Point::new(100.0, 100.0)]
        );
    }

    #[test]
    fn test_lasso_then_delete() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        run(&mut router, &mut canvas, &[down(5.0, 5.0), up(5.0, 5.0)]);
        run(&mut router, &mut canvas, &[down(100.0, 100.0), up(100.0, 100.0)]);
        lasso_square(&mut router, &mut canvas);

        assert_eq!(canvas.delete_selected(), 1);
        assert_eq!(canvas.active_strokes().len(), 1);
        assert_eq!(
            canvas.active_strokes()[0].defining_points(),
            vec![Point::new(100.0, 100.0)]
        );
    }

    #[test]
    fn test_empty_lasso_keeps_collecting_next_time() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        lasso_square(&mut router, &mut canvas);
        assert!(canvas.selection.is_empty());
        router.dispatch(&mut canvas, &down(1.0, 1.0));
        assert!(router.lasso_polygon().is_some());
    }

    #[test]
    fn test_touch_end_reuses_last_position() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        canvas.set_tool(ToolKind::Line);
        canvas.surface_origin = Point::new(0.0, 50.0);

        router.dispatch(&mut canvas, &PointerEvent::Down(PointerSource::touch(10.0, 60.0)));
        router.dispatch(&mut canvas, &PointerEvent::Move(PointerSource::touch(40.0, 90.0)));
        let repaint = router.dispatch(
            &mut canvas,
            &PointerEvent::Up(PointerSource::Touch { touches: Vec::new() }),
        );
        assert_eq!(repaint, Repaint::Full);
        assert_eq!(
            canvas.active_strokes()[0].defining_points(),
            vec![Point::new(10.0, 10.0), Point::new(40.0, 40.0)]
        );
    }

    #[test]
    fn test_cancel_discards_lasso() {
        let mut canvas = Canvas::new();
        let mut router = InputRouter::new();
        canvas.set_tool(ToolKind::Lasso);
        run(&mut router, &mut canvas, &[down(0.0, 0.0), mv(10.0, 0.0)]);
        assert_eq!(router.cancel(), Repaint::Full);
        assert!(router.is_idle());
        assert_eq!(router.dispatch(&mut canvas, &up(10.0, 10.0)), Repaint::None);
        assert!(canvas.selection.is_empty());
    }
}
