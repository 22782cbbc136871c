#![forbid(unsafe_code)]

//! Layout strategies for the Mosaic grid.
//!
//! A [`LayoutStrategy`] is a pure function of the current item set and the
//! container constraints, producing one [`Placement`] per item. Strategies
//! also answer hit-tests over their last computed geometry (used while
//! dragging) and can temporarily detach an item from flow (the item being
//! dragged follows the pointer instead).
//!
//! Strategies are registered by name in a [`LayoutRegistry`] populated at
//! startup; the grid looks its active strategy up by name and rebuilds it
//! from scratch on every switch. No state migrates between strategies.

pub mod dashboard;
pub mod fixed;
pub mod registry;
pub mod variable;

pub use dashboard::Dashboard;
pub use fixed::{FixedGrid, Justify};
pub use registry::LayoutRegistry;
pub use variable::VariableColumns;

use mosaic_core::{ItemId, Point, Rect, Size};
use rustc_hash::FxHashSet;

/// Container constraints for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Inner width of the container, in surface pixels.
    pub width: f64,
    /// Gap between adjacent cells, both axes.
    pub gap: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            gap: 8.0,
        }
    }
}

impl Viewport {
    /// Create a viewport with the given inner width and gap.
    #[must_use]
    pub fn new(width: f64, gap: f64) -> Self {
        Self { width, gap }
    }
}

/// One item as seen by a strategy: identity plus natural content size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    pub id: ItemId,
    pub size: Size,
}

/// Geometry assigned to one item by a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: ItemId,
    pub rect: Rect,
}

/// A pluggable geometry computation.
///
/// Implementations keep their last computed placements so that
/// [`item_at`](Self::item_at) can answer hit-tests between passes.
pub trait LayoutStrategy: std::fmt::Debug {
    /// The registry name this strategy was constructed under.
    fn name(&self) -> &'static str;

    /// Compute geometry for the given items under the given constraints.
    ///
    /// Detached items must be skipped. The returned placements are also
    /// retained internally for hit-testing.
    fn layout(&mut self, viewport: &Viewport, items: &[LayoutInput]) -> Vec<Placement>;

    /// The item whose last-assigned geometry contains `point`, if any.
    fn item_at(&self, point: Point) -> Option<ItemId>;

    /// Temporarily exclude an item from flow (it is being dragged).
    fn detach(&mut self, id: ItemId);

    /// Re-include a previously detached item.
    fn reattach(&mut self, id: ItemId);
}

/// Shared flow bookkeeping for the built-in strategies: the detached set
/// and the placements of the last pass.
#[derive(Debug, Clone, Default)]
pub(crate) struct Flow {
    detached: FxHashSet<ItemId>,
    placements: Vec<Placement>,
}

impl Flow {
    pub(crate) fn detach(&mut self, id: ItemId) {
        self.detached.insert(id);
    }

    pub(crate) fn reattach(&mut self, id: ItemId) {
        self.detached.remove(&id);
    }

    pub(crate) fn is_detached(&self, id: ItemId) -> bool {
        self.detached.contains(&id)
    }

    pub(crate) fn retain(&mut self, placements: Vec<Placement>) -> Vec<Placement> {
        self.placements = placements.clone();
        placements
    }

    pub(crate) fn hit_test(&self, point: Point) -> Option<ItemId> {
        self.placements
            .iter()
            .find(|p| p.rect.contains(point))
            .map(|p| p.id)
    }
}

/// Largest natural size over the attached items, used by the fixed
/// strategies to derive the uniform cell.
pub(crate) fn max_cell(items: impl Iterator<Item = Size>) -> Size {
    items.fold(Size::default(), |acc, s| {
        Size::new(acc.width.max(s.width), acc.height.max(s.height))
    })
}

/// Column count that fits `cell_width`-wide cells into `viewport`,
/// never less than one.
pub(crate) fn column_count(viewport: &Viewport, cell_width: f64) -> usize {
    if cell_width <= 0.0 || viewport.width < cell_width {
        return 1;
    }
    (((viewport.width + viewport.gap) / (cell_width + viewport.gap)).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_fits_gap() {
        let vp = Viewport::new(100.0, 10.0);
        // Two 45px cells plus one 10px gap = 100px exactly.
        assert_eq!(column_count(&vp, 45.0), 2);
        assert_eq!(column_count(&vp, 46.0), 1);
    }

    #[test]
    fn column_count_never_zero() {
        let vp = Viewport::new(10.0, 0.0);
        assert_eq!(column_count(&vp, 50.0), 1);
        assert_eq!(column_count(&vp, 0.0), 1);
    }

    #[test]
    fn max_cell_over_mixed_sizes() {
        let sizes = [Size::new(10.0, 40.0), Size::new(30.0, 20.0)];
        let cell = max_cell(sizes.into_iter());
        assert_eq!(cell, Size::new(30.0, 40.0));
    }
}
