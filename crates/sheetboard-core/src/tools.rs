//! Tool selection and the ambient drawing settings.

use crate::geometry::DEFAULT_HIT_THRESHOLD;
use crate::shapes::{ColorParseError, SerializableColor, StrokeKind, StrokeStyle};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Lasso,
    Line,
    Rect,
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Lasso,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Circle,
    ];

    /// The two-anchor shape this tool materializes on release, if any.
    pub fn shape_kind(self) -> Option<StrokeKind> {
        match self {
            ToolKind::Line => Some(StrokeKind::Line),
            ToolKind::Rect => Some(StrokeKind::Rect),
            ToolKind::Circle => Some(StrokeKind::Circle),
            ToolKind::Pen | ToolKind::Eraser | ToolKind::Lasso => None,
        }
    }

    /// Identifier used by the toolbar.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
            ToolKind::Lasso => "lasso",
            ToolKind::Line => "line",
            ToolKind::Rect => "rect",
            ToolKind::Circle => "circle",
        }
    }
}

/// Current tool plus the color/width read whenever a stroke is created.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Style applied to new strokes.
    pub current_style: StrokeStyle,
    /// Eraser hit distance.
    pub hit_threshold: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            current_style: StrokeStyle::default(),
            hit_threshold: DEFAULT_HIT_THRESHOLD,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Set the color from a color-picker string; the color is unchanged on error.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ColorParseError> {
        self.current_style.color = SerializableColor::from_hex(hex)?;
        Ok(())
    }

    pub fn set_width(&mut self, width: f64) {
        self.current_style.width = width;
    }
}
