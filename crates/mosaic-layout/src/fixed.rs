//! Uniform-cell grid strategies.
//!
//! Every item occupies an identical cell sized to the largest natural item
//! size. Leftover horizontal space is either gathered into a centered
//! margin or spread evenly into the gaps.

use crate::{Flow, LayoutInput, LayoutStrategy, Placement, Viewport, column_count, max_cell};
use mosaic_core::{ItemId, Point, Rect};

/// How the fixed grid distributes leftover horizontal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    /// Gather leftover space into equal margins on both sides.
    #[default]
    Centered,
    /// Spread leftover space into the gaps between columns.
    Spread,
}

/// Fixed-cell grid, centered or spread.
#[derive(Debug, Default)]
pub struct FixedGrid {
    justify: Justify,
    flow: Flow,
}

impl FixedGrid {
    #[must_use]
    pub fn new(justify: Justify) -> Self {
        Self {
            justify,
            flow: Flow::default(),
        }
    }
}

impl LayoutStrategy for FixedGrid {
    fn name(&self) -> &'static str {
        match self.justify {
            Justify::Centered => "fixed-centered",
            Justify::Spread => "fixed-spread",
        }
    }

    fn layout(&mut self, viewport: &Viewport, items: &[LayoutInput]) -> Vec<Placement> {
        let attached: Vec<&LayoutInput> = items
            .iter()
            .filter(|it| !self.flow.is_detached(it.id))
            .collect();
        if attached.is_empty() {
            return self.flow.retain(Vec::new());
        }

        let cell = max_cell(attached.iter().map(|it| it.size));
        if cell.is_empty() {
            return self.flow.retain(Vec::new());
        }
        // A grid shorter than one full row centers the cells it has.
        let columns = column_count(viewport, cell.width).min(attached.len());

        let used = columns as f64 * cell.width + (columns - 1) as f64 * viewport.gap;
        let (origin, gap) = match self.justify {
            Justify::Centered => (((viewport.width - used) / 2.0).max(0.0), viewport.gap),
            Justify::Spread => {
                let leftover = (viewport.width - columns as f64 * cell.width).max(0.0);
                let gap = leftover / (columns + 1) as f64;
                (gap, gap)
            }
        };

        let placements = attached
            .iter()
            .enumerate()
            .map(|(i, it)| {
                let col = i % columns;
                let row = i / columns;
                Placement {
                    id: it.id,
                    rect: Rect::new(
                        origin + col as f64 * (cell.width + gap),
                        row as f64 * (cell.height + viewport.gap),
                        cell.width,
                        cell.height,
                    ),
                }
            })
            .collect();
        self.flow.retain(placements)
    }

    fn item_at(&self, point: Point) -> Option<ItemId> {
        self.flow.hit_test(point)
    }

    fn detach(&mut self, id: ItemId) {
        self.flow.detach(id);
    }

    fn reattach(&mut self, id: ItemId) {
        self.flow.reattach(id);
    }
}
