//! Canvas state: document, tool settings and selection.

use crate::document::{Document, SheetError};
use crate::selection::Selection;
use crate::shapes::Stroke;
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Vec2};

/// Runtime canvas state (not persisted).
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: Document,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Strokes of the active sheet picked by the lasso.
    pub selection: Selection,
    /// Top-left of the drawing surface in client coordinates (for touch input).
    pub surface_origin: Point,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty single-sheet document.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            tool_manager: ToolManager::new(),
            selection: Selection::new(),
            surface_origin: Point::ZERO,
        }
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    /// Strokes of the active sheet in drawing order.
    pub fn active_strokes(&self) -> &[Stroke] {
        self.document.active_sheet().strokes()
    }

    /// Append a stroke to the active sheet.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.document.active_sheet_mut().push(stroke);
    }

    /// Remove every stroke of the active sheet hit at `point`, dropping them
    /// from the selection too.
    pub fn erase_at(&mut self, point: Point) -> usize {
        let threshold = self.tool_manager.hit_threshold;
        let sheet = self.document.active_sheet_mut();
        let removed = sheet.retain(|stroke| !stroke.hit_test(point, threshold));
        if removed > 0 {
            // Selection only ever refers to strokes still on the sheet
            self.selection.retain(|id| sheet.get(id).is_some());
            log::debug!("Erased {} stroke(s) at ({:.1}, {:.1})", removed, point.x, point.y);
        }
        removed
    }

    /// Replace the selection with the strokes picked by `polygon`.
    pub fn select_with_lasso(&mut self, polygon: &[Point]) {
        self.selection = Selection::from_lasso(self.document.active_sheet(), polygon);
        log::debug!(
            "Lasso with {} vertices selected {} stroke(s)",
            polygon.len(),
            self.selection.len()
        );
    }

    /// Move the selected strokes in place.
    pub fn translate_selection(&mut self, delta: Vec2) -> usize {
        self.document
            .active_sheet_mut()
            .translate(self.selection.ids(), delta)
    }

    /// Delete selected strokes and clear the selection.
    pub fn delete_selected(&mut self) -> usize {
        let selection = std::mem::take(&mut self.selection);
        self.document
            .active_sheet_mut()
            .retain(|stroke| !selection.contains(stroke.id()))
    }

    /// Clear the selection without deleting anything.
    pub fn cancel_selection(&mut self) {
        self.selection.clear();
    }

    /// Append a new sheet and make it active. Returns its index.
    pub fn add_sheet(&mut self) -> usize {
        self.selection.clear();
        let index = self.document.add_sheet();
        log::info!("Created sheet {} of {}", index + 1, self.document.sheet_count());
        index
    }

    /// Make another sheet active; the selection never spans sheets.
    pub fn switch_sheet(&mut self, index: usize) -> Result<(), SheetError> {
        self.document.switch_to(index)?;
        self.selection.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Freehand, StrokeKind, StrokeStyle};

    fn freehand(points: &[(f64, f64)]) -> Stroke {
        let points = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        Stroke::Freehand(Freehand::from_points(points, StrokeStyle::default()).unwrap())
    }

    #[test]
    fn test_eraser_round_trip() {
        let mut canvas = Canvas::new();
        canvas.add_stroke(freehand(&[(0.0, 0.0), (10.0, 0.0)]));

        assert_eq!(canvas.erase_at(Point::new(5.0, 50.0)), 0);
        assert_eq!(canvas.active_strokes().len(), 1);

        assert_eq!(canvas.erase_at(Point::new(5.0, 0.0)), 1);
        assert!(canvas.active_strokes().is_empty());
    }

    #[test]
    fn test_erase_drops_stroke_from_selection() {
        let mut canvas = Canvas::new();
        canvas.add_stroke(freehand(&[(2.0, 2.0), (8.0, 2.0)]));
        canvas.add_stroke(freehand(&[(5.0, 9.5), (6.0, 9.5)]));
        canvas.select_with_lasso(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        assert_eq!(canvas.selection.len(), 2);

        let kept = canvas.active_strokes()[1].id();

        assert_eq!(canvas.erase_at(Point::new(5.0, 1.0)), 1);
        assert_eq!(canvas.selection.ids(), &[kept]);
        assert_eq!(canvas.erase_at(Point::new(5.0, 9.0)), 1);
        assert!(canvas.selection.is_empty());
    }

    #[test]
    fn test_erase_miss_leaves_collection_unchanged() {
        let mut canvas = Canvas::new();
        let style = StrokeStyle::default();
        canvas.add_stroke(freehand(&[(0.0, 0.0), (10.0, 0.0)]));
        canvas.add_stroke(Stroke::shape(StrokeKind::Rect, Point::new(100.0, 100.0), Point::new(200.0, 200.0), style).unwrap());
        canvas.add_stroke(Stroke::shape(StrokeKind::Circle, Point::new(400.0, 400.0), Point::new(450.0, 400.0), style).unwrap());
        let before = canvas.document.clone();

        // Inside the rectangle and at the circle's center: outlines only
        canvas.erase_at(Point::new(150.0, 150.0));
        canvas.erase_at(Point::new(400.0, 400.0));
        canvas.erase_at(Point::new(700.0, 20.0));
        assert_eq!(canvas.document, before);
    }

    #[test]
    fn test_lasso_then_delete() {
        let mut canvas = Canvas::new();
        let s1 = freehand(&[(5.0, 5.0)]);
        let s2 = freehand(&[(100.0, 100.0)]);
        let s2_id = s2.id();
        canvas.add_stroke(s1);
        canvas.add_stroke(s2);

        canvas.select_with_lasso(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        assert_eq!(canvas.selection.len(), 1);

        assert_eq!(canvas.delete_selected(), 1);
        assert!(canvas.selection.is_empty());
        assert_eq!(canvas.active_strokes().len(), 1);
        assert_eq!(canvas.active_strokes()[0].id(), s2_id);
    }

    #[test]
    fn test_cancel_selection_keeps_strokes() {
        let mut canvas = Canvas::new();
        canvas.add_stroke(freehand(&[(5.0, 5.0)]));
        canvas.select_with_lasso(&[
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(0.0, 20.0),
        ]);
        assert_eq!(canvas.selection.len(), 1);
        canvas.cancel_selection();
        assert!(canvas.selection.is_empty());
        assert_eq!(canvas.active_strokes().len(), 1);
    }

    #[test]
    fn test_sheet_change_clears_selection() {
        let mut canvas = Canvas::new();
        canvas.add_stroke(freehand(&[(5.0, 5.0)]));
        canvas.select_with_lasso(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        canvas.add_sheet();
        assert!(canvas.selection.is_empty());
        assert!(canvas.switch_sheet(3).is_err());
        assert_eq!(canvas.document.active_index(), 1);
    }
}
