//! Toolbar and pointer actions understood by the application shell.

use serde::{Deserialize, Serialize};
use sheetboard_core::input::PointerEvent;
use sheetboard_core::tools::ToolKind;

/// Actions that can be triggered by the toolbar or the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    /// Change the current tool.
    SetTool { tool: ToolKind },
    /// Change stroke color from a color-picker value (`#rrggbb`).
    SetColor { color: String },
    /// Change stroke width.
    SetWidth { width: f64 },
    /// Pointer input on the drawing surface.
    Pointer { event: PointerEvent },
    /// Append a new sheet and switch to it.
    NewSheet,
    /// Switch to the sheet at `index` (zero-based).
    SwitchSheet { index: usize },
    /// Delete the lasso selection.
    DeleteSelected,
    /// Drop the lasso selection without deleting.
    CancelSelection,
    /// Resize the drawing surface.
    Resize { width: u32, height: u32 },
    /// Move the drawing surface within the client area.
    SetSurfaceOrigin { x: f64, y: f64 },
    /// Export every sheet to one PDF.
    ExportPdf,
}
