//! Ordered item store for one grid.

use crate::geometry::Size;
use crate::item::{Item, ItemFlags, ItemId};

/// Ordered, insertion-order-preserving owner of a grid's items.
///
/// Positions in the container define document order. Collections in the
/// engine crate are read-through views over a `Container`, never copies.
///
/// # Invariants
///
/// 1. At most one item carries [`ItemFlags::TABBABLE`].
/// 2. Ids are never reused within one container.
#[derive(Debug, Default)]
pub struct Container {
    items: Vec<Item>,
    next_id: u64,
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items, including removing and placeholder entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn allocate(&mut self, content_size: Size) -> Item {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        Item::new(id, content_size)
    }

    /// Append an item with the given natural size.
    pub fn push(&mut self, content_size: Size) -> ItemId {
        let item = self.allocate(content_size);
        let id = item.id();
        self.items.push(item);
        id
    }

    /// Insert an item at a document-order position (clamped to the end).
    pub fn insert_at(&mut self, index: usize, content_size: Size) -> ItemId {
        let item = self.allocate(content_size);
        let id = item.id();
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        id
    }

    /// Insert a placeholder immediately before `sibling`, sized and
    /// positioned like the sibling's current box.
    ///
    /// Returns `None` if the sibling is not present.
    pub fn insert_placeholder_before(&mut self, sibling: ItemId) -> Option<ItemId> {
        let at = self.position(sibling)?;
        let rect = self.items[at].rect;
        let mut item = self.allocate(rect.size());
        item.flags = ItemFlags::PLACEHOLDER;
        item.rect = rect;
        let id = item.id();
        self.items.insert(at, item);
        Some(id)
    }

    /// Document-order position of an item.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|it| it.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|it| it.id() == id)
    }

    /// All items in document order, transient entries included.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Item> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    /// The item immediately before `id` in document order.
    #[must_use]
    pub fn prev_sibling(&self, id: ItemId) -> Option<ItemId> {
        let at = self.position(id)?;
        at.checked_sub(1).map(|i| self.items[i].id())
    }

    /// The item immediately after `id` in document order.
    #[must_use]
    pub fn next_sibling(&self, id: ItemId) -> Option<ItemId> {
        let at = self.position(id)?;
        self.items.get(at + 1).map(|it| it.id())
    }

    /// Move `id` immediately before `before` in document order.
    ///
    /// A missing endpoint leaves the order unchanged.
    pub fn move_before(&mut self, id: ItemId, before: ItemId) {
        if id == before {
            return;
        }
        let Some(from) = self.position(id) else {
            return;
        };
        let item = self.items.remove(from);
        match self.position(before) {
            Some(to) => self.items.insert(to, item),
            None => self.items.insert(from.min(self.items.len()), item),
        }
    }

    /// Move `id` immediately after `after` in document order.
    pub fn move_after(&mut self, id: ItemId, after: ItemId) {
        if id == after {
            return;
        }
        let Some(from) = self.position(id) else {
            return;
        };
        let item = self.items.remove(from);
        match self.position(after) {
            Some(to) => self.items.insert(to + 1, item),
            None => self.items.insert(from.min(self.items.len()), item),
        }
    }

    /// Begin the removal transition: the item stays in document order,
    /// flagged removing, until [`purge`](Self::purge) drops it.
    ///
    /// Returns whether the item was present and not already removing.
    pub fn mark_removing(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) if !item.is_removing() => {
                item.flags.insert(ItemFlags::REMOVING);
                item.flags.remove(ItemFlags::TABBABLE);
                true
            }
            _ => false,
        }
    }

    /// Drop an item outright (end of its removal transition, or a
    /// placeholder swapped out at drag-end).
    pub fn purge(&mut self, id: ItemId) -> bool {
        match self.position(id) {
            Some(at) => {
                self.items.remove(at);
                true
            }
            None => false,
        }
    }

    /// The single tabbable item, if any.
    #[must_use]
    pub fn tabbable(&self) -> Option<ItemId> {
        self.items.iter().find(|it| it.is_tabbable()).map(Item::id)
    }

    /// Make `id` the single tabbable item, clearing the flag elsewhere.
    pub fn set_tabbable(&mut self, id: ItemId) {
        for item in &mut self.items {
            item.flags.set(ItemFlags::TABBABLE, item.id() == id);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    proptest! {
        #[test]
        fn positions_stay_unique_and_consistent(
            ops in prop::collection::vec(0u8..4, 1..50),
        ) {
            let mut c = Container::new();
            let mut live: Vec<ItemId> = Vec::new();
            for op in ops {
                match op {
                    0 => live.push(c.push(Size::new(10.0, 10.0))),
                    1 => {
                        if let Some(&id) = live.first() {
                            c.mark_removing(id);
                        }
                    }
                    2 => {
                        if let Some(id) = live.pop() {
                            c.purge(id);
                        }
                    }
                    _ => {
                        if live.len() >= 2 {
                            c.move_before(live[live.len() - 1], live[0]);
                        }
                    }
                }
                live.retain(|id| c.position(*id).is_some());

                let mut seen = BTreeSet::new();
                for id in &live {
                    let at = c.position(*id).expect("live item has a position");
                    prop_assert!(seen.insert(at), "duplicate position {at}");
                    prop_assert_eq!(c.get(*id).expect("live item resolves").id(), *id);
                }
                prop_assert!(
                    c.iter().filter(|it| it.is_tabbable()).count() <= 1,
                    "tabbable invariant broken"
                );
            }
        }
    }
}
