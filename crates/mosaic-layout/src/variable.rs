//! Shortest-column masonry.
//!
//! Columns share a fixed width (the widest natural item); item heights are
//! preserved. Each item lands in the currently shortest column, so column
//! bottoms stay as level as the content allows.

use crate::{Flow, LayoutInput, LayoutStrategy, Placement, Viewport, column_count};
use mosaic_core::{ItemId, Point, Rect};

/// Variable-height masonry over equal-width columns.
#[derive(Debug, Default)]
pub struct VariableColumns {
    flow: Flow,
}

impl VariableColumns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStrategy for VariableColumns {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn layout(&mut self, viewport: &Viewport, items: &[LayoutInput]) -> Vec<Placement> {
        let attached: Vec<&LayoutInput> = items
            .iter()
            .filter(|it| !self.flow.is_detached(it.id))
            .collect();
        if attached.is_empty() {
            return self.flow.retain(Vec::new());
        }

        let column_width = attached
            .iter()
            .map(|it| it.size.width)
            .fold(0.0_f64, f64::max);
        if column_width <= 0.0 {
            return self.flow.retain(Vec::new());
        }
        let columns = column_count(viewport, column_width);
        let mut heights = vec![0.0_f64; columns];

        let placements = attached
            .iter()
            .map(|it| {
                // Shortest column wins; ties go left.
                let col = heights
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                let y = heights[col];
                heights[col] = y + it.size.height + viewport.gap;
                Placement {
                    id: it.id,
                    rect: Rect::new(
                        col as f64 * (column_width + viewport.gap),
                        y,
                        column_width,
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

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Size;

    fn inputs(sizes: &[(f64, f64)]) -> Vec<LayoutInput> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| LayoutInput {
                id: ItemId(i as u64),
                size: Size::new(w, h),
            })
            .collect()
    }

    #[test]
    fn items_keep_their_heights() {
        let mut grid = VariableColumns::new();
        let placements = grid.layout(
            &Viewport::new(100.0, 0.0),
            &inputs(&[(40.0, 10.0), (40.0, 25.0)]),
        );
        assert_eq!(placements[0].rect.height, 10.0);
        assert_eq!(placements[1].rect.height, 25.0);
    }

    #[test]
    fn fills_the_shortest_column() {
        let mut grid = VariableColumns::new();
        // Two columns. Tall item in column 0, then two short ones should
        // stack in column 1 before column 0 receives another.
        let placements = grid.layout(
            &Viewport::new(90.0, 10.0),
            &inputs(&[(40.0, 100.0), (40.0, 10.0), (40.0, 10.0), (40.0, 10.0)]),
        );
        assert_eq!(placements[0].rect.x, 0.0);
        assert_eq!(placements[1].rect.x, 50.0);
        assert_eq!(placements[2].rect.x, 50.0);
        assert_eq!(placements[2].rect.y, 20.0);
        assert_eq!(placements[3].rect.x, 50.0);
    }

    #[test]
    fn tie_goes_to_the_left_column() {
        let mut grid = VariableColumns::new();
        let placements = grid.layout(
            &Viewport::new(90.0, 10.0),
            &inputs(&[(40.0, 10.0), (40.0, 10.0), (40.0, 10.0)]),
        );
        assert_eq!(placements[0].rect.x, 0.0);
        assert_eq!(placements[1].rect.x, 50.0);
        // Both columns are equally tall again: left wins.
        assert_eq!(placements[2].rect.x, 0.0);
    }

    #[test]
    fn narrow_viewport_degrades_to_one_column() {
        let mut grid = VariableColumns::new();
        let placements = grid.layout(
            &Viewport::new(30.0, 10.0),
            &inputs(&[(40.0, 10.0), (40.0, 10.0)]),
        );
        assert_eq!(placements[0].rect.x, 0.0);
        assert_eq!(placements[1].rect.x, 0.0);
        assert_eq!(placements[1].rect.y, 20.0);
    }
}
