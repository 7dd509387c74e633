//! Sheetboard Core Library
//!
//! Platform-agnostic data model and gesture logic for the Sheetboard whiteboard.

pub mod canvas;
pub mod document;
pub mod geometry;
pub mod input;
pub mod router;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use canvas::Canvas;
pub use document::{Document, Sheet, SheetError};
pub use geometry::{DEFAULT_HIT_THRESHOLD, point_in_polygon, point_to_polyline_dist, point_to_segment_dist};
pub use input::{PointerEvent, PointerSource};
pub use router::{Gesture, InputRouter, Repaint};
pub use selection::Selection;
pub use shapes::{ColorParseError, SerializableColor, ShapeTrait, Stroke, StrokeId, StrokeKind, StrokeStyle};
pub use tools::{ToolKind, ToolManager};
