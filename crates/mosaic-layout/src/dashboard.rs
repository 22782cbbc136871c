//! Span-aware masonry for dashboard tiles.
//!
//! The column unit is the narrowest natural item width; wider items span
//! multiple columns. Placement is first-fit over a skyline of column
//! heights: each item takes the span window with the lowest resulting top
//! edge, ties going left.

use crate::{Flow, LayoutInput, LayoutStrategy, Placement, Viewport, column_count};
use mosaic_core::{ItemId, Point, Rect};

/// Multi-span skyline masonry.
#[derive(Debug, Default)]
pub struct Dashboard {
    flow: Flow,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Columns a tile of `width` occupies when the unit column is `unit` wide.
fn span_for(width: f64, unit: f64, gap: f64, columns: usize) -> usize {
    let span = ((width + gap) / (unit + gap)).round() as usize;
    span.clamp(1, columns)
}

impl LayoutStrategy for Dashboard {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn layout(&mut self, viewport: &Viewport, items: &[LayoutInput]) -> Vec<Placement> {
        let attached: Vec<&LayoutInput> = items
            .iter()
            .filter(|it| !self.flow.is_detached(it.id))
            .collect();
        if attached.is_empty() {
            return self.flow.retain(Vec::new());
        }

        let unit = attached
            .iter()
            .map(|it| it.size.width)
            .filter(|w| *w > 0.0)
            .fold(f64::INFINITY, f64::min);
        if !unit.is_finite() {
            return self.flow.retain(Vec::new());
        }
        let columns = column_count(viewport, unit);
        let mut heights = vec![0.0_f64; columns];

        let placements = attached
            .iter()
            .map(|it| {
                let span = span_for(it.size.width, unit, viewport.gap, columns);
                // Lowest top edge over every span-wide window, ties left.
                let mut best = (0usize, f64::INFINITY);
                for start in 0..=(columns - span) {
                    let top = heights[start..start + span]
                        .iter()
                        .fold(0.0_f64, |a, &b| a.max(b));
                    if top < best.1 {
                        best = (start, top);
                    }
                }
                let (start, y) = best;
                let width = span as f64 * unit + (span - 1) as f64 * viewport.gap;
                for h in &mut heights[start..start + span] {
                    *h = y + it.size.height + viewport.gap;
                }
                Placement {
                    id: it.id,
                    rect: Rect::new(
                        start as f64 * (unit + viewport.gap),
                        y,
                        width,
                        it.size.height,
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
