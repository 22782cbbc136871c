//! Change notifications from the host's observed subtree.
//!
//! The host watches the grid's subtree (child add/remove, attribute and
//! content changes) and delivers batched [`ChangeRecord`]s; the engine
//! reacts by invalidating layout. No polling.

use crate::geometry::Size;
use crate::item::ItemId;

/// One observed change.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeRecord {
    /// A child element appeared; the engine inserts a matching item.
    ChildAdded {
        /// Document-order position of the new child.
        index: usize,
        content_size: Size,
    },
    /// A child element was detached; its item enters the removal
    /// transition.
    ChildRemoved { item: ItemId },
    /// A boolean marker attribute changed on an item.
    MarkerChanged {
        item: ItemId,
        marker: String,
        on: bool,
    },
    /// An item's content finished loading (e.g. an image decoded) with a
    /// new natural size.
    ContentLoaded { item: ItemId, size: Size },
}

/// A batch of changes delivered in one notification.
pub type ChangeBatch = Vec<ChangeRecord>;

/// Why a layout pass was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// Structural or attribute mutation in the watched subtree.
    Mutation,
    /// An item's content finished loading.
    ContentLoaded,
    /// The container was resized.
    Resize,
    /// Drag-reorder support was toggled on or off.
    OrderableToggled,
    /// The container transitioned from hidden to visible.
    VisibilityShown,
    /// Host-driven invalidation via `schedule_layout`.
    Manual,
}
