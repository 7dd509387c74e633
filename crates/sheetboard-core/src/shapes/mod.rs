//! Stroke definitions for the whiteboard.

mod circle;
mod freehand;
mod line;
mod rectangle;

pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A color string that is not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a color-picker value such as `#1e90ff` or `#fff`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(hex.to_string());
        let digits = hex.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                255,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?, 255))
            }
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb` (alpha is dropped).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Color and width of a stroke, captured when the stroke is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width in pixels.
    pub width: f64,
}

impl StrokeStyle {
    pub const DEFAULT_WIDTH: f64 = 2.0;

    pub fn new(color: SerializableColor, width: f64) -> Self {
        Self { color, width }
    }

    /// Width to draw with; non-finite or non-positive widths count as unset.
    pub fn effective_width(&self) -> f64 {
        if self.width.is_finite() && self.width > 0.0 {
            self.width
        } else {
            Self::DEFAULT_WIDTH
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: Self::DEFAULT_WIDTH,
        }
    }
}

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Discriminant of a [`Stroke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeKind {
    Freehand,
    Line,
    Rect,
    Circle,
}

/// Common trait for all stroke variants.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> StrokeId;

    /// The points that define the stroke: every freehand point, or both anchors.
    fn defining_points(&self) -> Vec<Point>;

    /// Check whether `point` lies strictly within `threshold` of the drawn outline.
    fn hit_test(&self, point: Point, threshold: f64) -> bool;

    /// Get the bounding box of the drawn outline.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &StrokeStyle;

    /// Get mutable style.
    /// Move every defining point by `delta`.
    fn translate(&mut self, delta: Vec2);
}

/// One drawable unit on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stroke {
    Freehand(Freehand),
    Line(Line),
    Rect(Rectangle),
    Circle(Circle),
}

impl Stroke {
    /// Build a two-anchor shape of the given kind.
    ///
    /// Returns `None` for [`StrokeKind::Freehand`], which is built point by point.
    pub fn shape(kind: StrokeKind, p1: Point, p2: Point, style: StrokeStyle) -> Option<Self> {
        match kind {
            StrokeKind::Freehand => None,
            StrokeKind::Line => Some(Stroke::Line(Line::new(p1, p2, style))),
            StrokeKind::Rect => Some(Stroke::Rect(Rectangle::new(p1, p2, style))),
            StrokeKind::Circle => Some(Stroke::Circle(Circle::new(p1, p2, style))),
        }
    }

    pub fn kind(&self) -> StrokeKind {
        match self {
            Stroke::Freehand(_) => StrokeKind::Freehand,
            Stroke::Line(_) => StrokeKind::Line,
            Stroke::Rect(_) => StrokeKind::Rect,
            Stroke::Circle(_) => StrokeKind::Circle,
        }
    }

    fn as_shape(&self) -> &dyn ShapeTrait {
        match self {
            Stroke::Freehand(s) => s,
            Stroke::Line(s) => s,
            Stroke::Rect(s) => s,
            Stroke::Circle(s) => s,
        }
    }

    fn as_shape_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Stroke::Freehand(s) => s,
            Stroke::Line(s) => s,
            Stroke::Rect(s) => s,
            Stroke::Circle(s) => s,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.as_shape().id()
    }

    pub fn defining_points(&self) -> Vec<Point> {
        self.as_shape().defining_points()
    }

    pub fn hit_test(&self, point: Point, threshold: f64) -> bool {
        self.as_shape().hit_test(point, threshold)
    }

    pub fn bounds(&self) -> Rect {
        self.as_shape().bounds()
    }

    pub fn to_path(&self) -> BezPath {
        self.as_shape().to_path()
    }

    pub fn style(&self) -> &StrokeStyle {
        self.as_shape().style()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_shape_mut().translate(delta);
    }

    /// Get the mutable freehand path if this stroke is one.
    pub fn as_freehand_mut(&mut self) -> Option<&mut Freehand> {
        match self {
            Stroke::Freehand(f) => Some(f),
            _ => None,
        }
    }
}
