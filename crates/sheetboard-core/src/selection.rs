//! Lasso selection.

use crate::document::Sheet;
use crate::geometry::point_in_polygon;
use crate::shapes::StrokeId;
use kurbo::Point;

/// Strokes of the active sheet picked by the lasso, held by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<StrokeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every stroke of `sheet` with at least one defining point inside `polygon`.
    pub fn from_lasso(sheet: &Sheet, polygon: &[Point]) -> Self {
        let ids = sheet
            .iter()
            .filter(|stroke| {
                stroke
                    .defining_points()
                    .into_iter()
                    .any(|p| point_in_polygon(p, polygon))
            })
            .map(|stroke| stroke.id())
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[StrokeId] {
        &self.ids
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep only the ids matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(StrokeId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
