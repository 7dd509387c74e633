//! Sheets and the multi-sheet document.

use crate::shapes::{Stroke, StrokeId};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("Sheet {index} does not exist (document has {len} sheets)")]
    OutOfRange { index: usize, len: usize },
}

/// One independent page holding an ordered stroke collection.
///
/// Insertion order is z-order: later strokes draw on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    strokes: Vec<Stroke>,
}

impl Sheet {
    /// Create a new empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke on top of all others.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Keep only the strokes matching `keep`, returning how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Stroke) -> bool) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(|s| keep(s));
        before - self.strokes.len()
    }

    /// Translate every stroke whose id is in `ids` by `delta`, in place.
    pub fn translate(&mut self, ids: &[StrokeId], delta: Vec2) -> usize {
        let mut moved = 0;
        for stroke in self.strokes.iter_mut().filter(|s| ids.contains(&s.id())) {
            stroke.translate(delta);
            moved += 1;
        }
        moved
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    /// Strokes in drawing order (back to front).
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// An ordered list of sheets with one active sheet.
///
/// At least one sheet always exists and the active index is always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    sheets: Vec<Sheet>,
    active: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a single empty sheet.
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::new()],
            active: 0,
        }
    }

    /// Append a new empty sheet and make it active. Returns its index.
    pub fn add_sheet(&mut self) -> usize {
        self.sheets.push(Sheet::new());
        self.active = self.sheets.len() - 1;
        self.active
    }

    /// Make the sheet at `index` active.
    pub fn switch_to(&mut self, index: usize) -> Result<(), SheetError> {
        if index >= self.sheets.len() {
            return Err(SheetError::OutOfRange {
                index,
                len: self.sheets.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_sheet(&self) -> &Sheet {
        &self.sheets[self.active]
    }

    pub fn active_sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheets[self.active]
    }

    /// Sheets in document order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Display labels for the sheet picker: `Sheet 1`, `Sheet 2`, ...
    pub fn sheet_labels(&self) -> Vec<String> {
        (1..=self.sheets.len()).map(|n| format!("Sheet {n}")).collect()
    }
}
