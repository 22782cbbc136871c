//! Selection-predicate queries and bulk deselection.
//!
//! Queries compose explicit predicates over the collection view: a *unit*
//! is neither removing nor a placeholder, and a *selectable* unit is
//! additionally not disabled. Hidden items stay selectable. The marker
//! that denotes "selected" is an explicit parameter on every query
//! (default [`SELECTED_MARKER`]), so a consumer can reuse the engine for
//! an `active`-style marker.

use crate::collection::ItemCollection;
use mosaic_core::{Container, Item, ItemId, SELECTED_MARKER};

/// Selection queries over a container.
#[derive(Debug, Clone, Copy)]
pub struct SelectableCollection<'a> {
    items: ItemCollection<'a>,
}

impl<'a> SelectableCollection<'a> {
    /// Queries over the default collection view (transients hidden).
    #[must_use]
    pub fn new(container: &'a Container) -> Self {
        Self {
            items: ItemCollection::new(container),
        }
    }

    /// The underlying collection view.
    #[must_use]
    pub fn collection(&self) -> &ItemCollection<'a> {
        &self.items
    }

    /// Items eligible for selection toggling, in document order.
    ///
    /// Already-selected items are included; selection is a toggle, not a
    /// filter.
    pub fn selectable_items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.items.iter().filter(|it| it.is_selectable())
    }

    #[must_use]
    pub fn first_selectable(&self) -> Option<ItemId> {
        self.selectable_items().next().map(Item::id)
    }

    #[must_use]
    pub fn last_selectable(&self) -> Option<ItemId> {
        self.selectable_items().last().map(Item::id)
    }

    /// Nearest selectable item before `item`, or `item` itself at the
    /// boundary.
    ///
    /// Never returns none: callers can always move focus without an
    /// option check.
    #[must_use]
    pub fn previous_selectable(&self, item: ItemId) -> ItemId {
        let mut cursor = item;
        while let Some(prev) = self.items.prev(cursor) {
            if self.is_selectable(prev) {
                return prev;
            }
            cursor = prev;
        }
        item
    }

    /// Nearest selectable item after `item`, or `item` itself at the
    /// boundary.
    #[must_use]
    pub fn next_selectable(&self, item: ItemId) -> ItemId {
        let mut cursor = item;
        while let Some(next) = self.items.next(cursor) {
            if self.is_selectable(next) {
                return next;
            }
            cursor = next;
        }
        item
    }

    fn is_selectable(&self, id: ItemId) -> bool {
        self.items.iter().any(|it| it.id() == id && it.is_selectable())
    }

    /// First item carrying `marker`, in document order.
    #[must_use]
    pub fn first_selected(&self, marker: &str) -> Option<ItemId> {
        self.items
            .iter()
            .find(|it| it.has_marker(marker))
            .map(Item::id)
    }

    /// Last item carrying `marker`, in document order.
    #[must_use]
    pub fn last_selected(&self, marker: &str) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|it| it.has_marker(marker))
            .next_back()
            .map(Item::id)
    }

    /// All items carrying `marker`, in document order.
    #[must_use]
    pub fn all_selected(&self, marker: &str) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|it| it.has_marker(marker))
            .map(Item::id)
            .collect()
    }
}

/// Clear `marker` on every item carrying it except `survivor`.
///
/// Clearing ignores disabled/removing state: a marker set on a transient
/// item is still removed. Returns the cleared ids in document order.
pub fn deselect_all_except(
    container: &mut Container,
    survivor: Option<ItemId>,
    marker: &str,
) -> Vec<ItemId> {
    let mut cleared = Vec::new();
    for item in container.iter_mut() {
        if Some(item.id()) != survivor && item.has_marker(marker) {
            item.set_marker(marker, false);
            cleared.push(item.id());
        }
    }
    cleared
}

/// Keep only the first currently-selected item (by [`SELECTED_MARKER`]
/// semantics for the given marker), clearing the rest.
pub fn keep_first_selected(container: &mut Container, marker: &str) -> Vec<ItemId> {
    let survivor = SelectableCollection::new(container).first_selected(marker);
    deselect_all_except(container, survivor, marker)
}

/// Keep only the last currently-selected item, clearing the rest.
pub fn keep_last_selected(container: &mut Container, marker: &str) -> Vec<ItemId> {
    let survivor = SelectableCollection::new(container).last_selected(marker);
    deselect_all_except(container, survivor, marker)
}

/// Convenience: the default marker name re-exported next to the queries.
pub const DEFAULT_MARKER: &str = SELECTED_MARKER;
