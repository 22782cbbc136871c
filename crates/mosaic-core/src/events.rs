//! Events the engine reports to its host.

use crate::item::ItemId;

/// A selection snapshot.
///
/// `single` and `none` modes report a scalar item-or-none; `multiple`
/// reports the selected set in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(Option<ItemId>),
    Multiple(Vec<ItemId>),
}

impl Selection {
    /// Number of selected items in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(None) => 0,
            Selection::Single(Some(_)) => 1,
            Selection::Multiple(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Old and new selection around one validated mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub old_selection: Selection,
    pub selection: Selection,
}

/// A completed drag reorder.
///
/// `old_before`/`before` are the item's previous sibling before and after
/// the drag, so the host can compute the order delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    pub item: ItemId,
    pub old_before: Option<ItemId>,
    pub before: Option<ItemId>,
}

/// Engine output event.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    SelectionChanged(SelectionChange),
    OrderChanged(OrderChange),
    /// Items whose entrance transitions should be applied, batched per
    /// layout pass.
    ItemsEntered(Vec<ItemId>),
}
