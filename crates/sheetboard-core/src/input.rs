//! Unified mouse/touch pointer input.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Where a pointer sample came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PointerSource {
    /// Mouse position, already relative to the drawing surface.
    Mouse { offset: Point },
    /// Active touches in client (window) coordinates.
    ///
    /// Touch-end events report no remaining touches.
    Touch { touches: Vec<Point> },
}

impl PointerSource {
    pub fn mouse(x: f64, y: f64) -> Self {
        PointerSource::Mouse {
            offset: Point::new(x, y),
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        PointerSource::Touch {
            touches: vec![Point::new(x, y)],
        }
    }

    /// Position on the drawing surface.
    ///
    /// Prefers the first touch (translated by the surface origin), else the
    /// mouse offset. `None` when a touch event carries no touches.
    pub fn position(&self, surface_origin: Point) -> Option<Point> {
        match self {
            PointerSource::Touch { touches } => touches
                .first()
                .map(|t| Point::new(t.x - surface_origin.x, t.y - surface_origin.y)),
            PointerSource::Mouse { offset } => Some(*offset),
        }
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "pointer", rename_all = "snake_case")]
pub enum PointerEvent {
    Down(PointerSource),
    Move(PointerSource),
    Up(PointerSource),
}

impl PointerEvent {
    pub fn source(&self) -> &PointerSource {
        match self {
            PointerEvent::Down(s) | PointerEvent::Move(s) | PointerEvent::Up(s) => s,
        }
    }
}
