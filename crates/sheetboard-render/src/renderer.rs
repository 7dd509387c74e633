//! Renderer trait abstraction.

use kurbo::{Point, Size};
use sheetboard_core::document::Sheet;
use sheetboard_core::router::Repaint;
use sheetboard_core::shapes::{Stroke, StrokeStyle};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Trait for drawing surfaces.
///
/// Implementations only need the primitive operations; full and incremental
/// repaints are provided on top of them.
pub trait Renderer {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Fill the whole surface with the background.
    fn clear(&mut self);

    /// Draw one stroke with its own color and width.
    fn draw_stroke(&mut self, stroke: &Stroke);

    /// Draw a single straight segment, used for incremental freehand drawing.
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Draw the in-progress lasso polygon as a dashed closed outline.
    fn draw_lasso_overlay(&mut self, polygon: &[Point]);

    /// Change the surface size, keeping the overlapping pixels.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Clear and draw every stroke of `sheet` in insertion order.
    fn redraw(&mut self, sheet: &Sheet) {
        self.clear();
        for stroke in sheet.iter() {
            self.draw_stroke(stroke);
        }
    }

    /// Bring the surface up to date after a router dispatch.
    fn apply(&mut self, repaint: &Repaint, sheet: &Sheet, lasso: Option<&[Point]>) {
        match repaint {
            Repaint::None => {}
            Repaint::Segment { from, to, style } => self.draw_segment(*from, *to, style),
            Repaint::Full => self.redraw(sheet),
            Repaint::FullWithLasso => {
                self.redraw(sheet);
                if let Some(polygon) = lasso {
                    self.draw_lasso_overlay(polygon);
                }
            }
        }
    }
}
