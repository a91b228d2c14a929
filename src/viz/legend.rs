//! Legend accumulation and drawing.
//!
//! Entries are collected while construction rectangles are laid out and drawn
//! as a swatch column to the right of the diagram. The list belongs to one
//! render session; a new render starts from an empty builder.

use super::svg::{Fill, SvgDoc};

/// Swatch edge length in pixels.
pub const SWATCH_SIZE: f64 = 20.0;
/// Vertical distance between successive swatch tops.
pub const ROW_SPACING: f64 = SWATCH_SIZE * 1.5;

/// One legend row: the element id of the shapes it describes, the label, and
/// the swatch fill (shared with the rectangles that introduced it).
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub id: String,
    pub description: String,
    pub fill: Fill,
}

/// Ordered, deduplicated legend list.
///
/// Duplicates are detected by exact description match with a linear scan over
/// the entries accumulated so far; first-seen order wins.
#[derive(Debug, Default)]
pub struct LegendBuilder {
    entries: Vec<LegendEntry>,
}

impl LegendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry unless one with the same description already exists.
    /// Returns whether the entry was inserted.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        fill: Fill,
    ) -> bool {
        let description = description.into();
        if self.entries.iter().any(|e| e.description == description) {
            return false;
        }
        self.entries.push(LegendEntry {
            id: id.into(),
            description,
            fill,
        });
        true
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Draw the legend as a swatch column starting at `(x, y_top)`.
pub fn draw_legend(doc: &mut SvgDoc, entries: &[LegendEntry], x: f64, y_top: f64) {
    if entries.is_empty() {
        return;
    }
    doc.open_group("legend_descriptions");
    let mut y = y_top;
    for entry in entries {
        doc.rect(x, y, SWATCH_SIZE, SWATCH_SIZE, &entry.fill, "legend_swatch", None, None);
        doc.text(
            x + SWATCH_SIZE * 1.25,
            y + SWATCH_SIZE * 0.5 + 3.0,
            "legend_label",
            None,
            &entry.description,
        );
        y += ROW_SPACING;
    }
    doc.close_group();
}
