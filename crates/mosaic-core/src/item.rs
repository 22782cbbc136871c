//! The arrangeable unit of a grid.

use crate::geometry::{Rect, Size};
use bitflags::bitflags;
use rustc_hash::FxHashSet;

/// The default selection marker name.
pub const SELECTED_MARKER: &str = "selected";

/// Stable identity of an item within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

bitflags! {
    /// Item state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ItemFlags: u8 {
        /// Excluded from keyboard-navigation selectability queries.
        const DISABLED = 1 << 0;
        /// Detached from the host tree; awaiting its removal transition.
        const REMOVING = 1 << 1;
        /// Synthetic drag stand-in marking the prospective drop slot.
        const PLACEHOLDER = 1 << 2;
        /// Reachable via sequential keyboard navigation. At most one item
        /// per container carries this flag.
        const TABBABLE = 1 << 3;
        /// Inserted since the last layout pass; its entrance transition has
        /// not been applied yet.
        const PENDING_ENTER = 1 << 4;
        /// Geometry has been assigned by at least one layout pass.
        const MANAGED = 1 << 5;
    }
}

/// One arrangeable unit.
///
/// Items are owned by their [`Container`](crate::container::Container);
/// everything else holds an [`ItemId`].
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    pub(crate) flags: ItemFlags,
    markers: FxHashSet<String>,
    /// Natural content size reported by the host (e.g. decoded image
    /// dimensions). Input to layout.
    pub content_size: Size,
    /// Geometry assigned by the most recent layout pass.
    pub rect: Rect,
}

impl Item {
    pub(crate) fn new(id: ItemId, content_size: Size) -> Self {
        Self {
            id,
            flags: ItemFlags::PENDING_ENTER,
            markers: FxHashSet::default(),
            content_size,
            rect: Rect::default(),
        }
    }

    /// The item's stable identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Current state flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ItemFlags::DISABLED)
    }

    #[inline]
    #[must_use]
    pub fn is_removing(&self) -> bool {
        self.flags.contains(ItemFlags::REMOVING)
    }

    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.flags.contains(ItemFlags::PLACEHOLDER)
    }

    #[inline]
    #[must_use]
    pub fn is_tabbable(&self) -> bool {
        self.flags.contains(ItemFlags::TABBABLE)
    }

    /// A real, present item: neither removing nor a placeholder.
    ///
    /// This is the base predicate every selection query composes with.
    #[inline]
    #[must_use]
    pub fn is_unit(&self) -> bool {
        !self.flags.intersects(ItemFlags::REMOVING | ItemFlags::PLACEHOLDER)
    }

    /// Eligible for selection-state toggling via keyboard navigation:
    /// a unit that is not disabled. Hidden items stay selectable.
    #[inline]
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.is_unit() && !self.is_disabled()
    }

    /// Whether the item carries the given boolean marker.
    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    /// Set or clear a marker. Returns whether the marker state changed.
    pub fn set_marker(&mut self, marker: &str, on: bool) -> bool {
        if on {
            self.markers.insert(marker.to_owned())
        } else {
            self.markers.remove(marker)
        }
    }

    /// Set or clear the disabled flag.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.flags.set(ItemFlags::DISABLED, disabled);
    }

    /// Clear the pending-enter flag, returning whether it was set.
    ///
    /// The layout pass drains these in one batch so entrance transitions
    /// apply together.
    pub fn take_pending_enter(&mut self) -> bool {
        let pending = self.flags.contains(ItemFlags::PENDING_ENTER);
        self.flags.remove(ItemFlags::PENDING_ENTER);
        pending
    }

    /// Record that a layout pass has assigned this item geometry.
    pub fn mark_managed(&mut self) {
        self.flags.insert(ItemFlags::MANAGED);
    }
}
