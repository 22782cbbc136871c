//! Live drag reorder with geometric placeholder tracking.
//!
//! While an item is dragged it is detached from strategy flow and follows
//! the pointer; a placeholder occupies its prospective drop slot. The
//! placeholder relocates only when the pointer is moving away from (or
//! level with) its current slot, measured as weighted distance normalized
//! by the placeholder's own box, so non-square items don't bias one axis
//! and near-equidistant slots don't make it oscillate.
//!
//! # Invariants
//!
//! 1. At most one drag session exists at a time.
//! 2. Session state is cleared unconditionally at drag-end, whether or not
//!    a placeholder still exists; an end without a session is a no-op.
//! 3. Equal old/new distances relocate (the comparison that keeps the
//!    placeholder is strictly `new < old`).

use mosaic_core::{Container, ItemId, OrderChange, Point};
use mosaic_layout::LayoutStrategy;

/// State for one in-progress drag.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub item: ItemId,
    pub placeholder: Option<ItemId>,
    /// The item's previous sibling at drag-start, reported in the
    /// order-change event.
    pub old_before: Option<ItemId>,
    pub last_pointer: Option<Point>,
}

/// Tracks a dragged item against its live placeholder.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Begin dragging `item`: detach it from flow and plant a placeholder
    /// immediately before it.
    ///
    /// Rejected (returns `false`) while another session is active or when
    /// the item is absent, removing, or itself a placeholder.
    pub fn start(
        &mut self,
        container: &mut Container,
        strategy: &mut dyn LayoutStrategy,
        item: ItemId,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        if !container.get(item).is_some_and(|it| it.is_unit()) {
            return false;
        }
        let old_before = container.prev_sibling(item);
        let placeholder = container.insert_placeholder_before(item);
        strategy.detach(item);
        self.session = Some(DragSession {
            item,
            placeholder,
            old_before,
            last_pointer: None,
        });
        true
    }

    /// Track a pointer move. Returns whether the placeholder relocated
    /// (the caller invalidates layout when it did).
    pub fn update(
        &mut self,
        container: &mut Container,
        strategy: &mut dyn LayoutStrategy,
        pointer: Point,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let previous = session.last_pointer.replace(pointer);
        let Some(placeholder) = session.placeholder else {
            return false;
        };
        let Some(slot) = container.get(placeholder) else {
            return false;
        };

        let center = slot.rect.center();
        let reference = slot.rect.size();
        let new_distance = pointer.weighted_distance_to(center, reference);
        if let Some(prev) = previous {
            let old_distance = prev.weighted_distance_to(center, reference);
            // Moving toward the slot: hold position. Level or away (ties
            // included) falls through to relocation.
            if new_distance < old_distance {
                return false;
            }
        }

        let Some(target) = strategy.item_at(pointer) else {
            return false;
        };
        if target == session.item || target == placeholder {
            return false;
        }
        if !container.get(target).is_some_and(|it| !it.is_removing()) {
            return false;
        }
        let (Some(target_at), Some(slot_at)) =
            (container.position(target), container.position(placeholder))
        else {
            return false;
        };
        if target_at < slot_at {
            container.move_before(placeholder, target);
        } else {
            container.move_after(placeholder, target);
        }
        true
    }

    /// Finish the drag: swap the placeholder for the real item, reattach
    /// it to flow, and report the order delta.
    ///
    /// Returns `None` (and still clears all session state) when no
    /// session or no placeholder exists, or when either endpoint vanished
    /// mid-drag.
    pub fn end(
        &mut self,
        container: &mut Container,
        strategy: &mut dyn LayoutStrategy,
    ) -> Option<OrderChange> {
        let session = self.session.take()?;
        strategy.reattach(session.item);
        let placeholder = session.placeholder?;
        if container.position(session.item).is_none() {
            container.purge(placeholder);
            return None;
        }
        if container.position(placeholder).is_none() {
            return None;
        }
        container.move_before(session.item, placeholder);
        container.purge(placeholder);
        let before = container.prev_sibling(session.item);
        Some(OrderChange {
            item: session.item,
            old_before: session.old_before,
            before,
        })
    }

    /// Abandon the drag without reordering: the placeholder is dropped and
    /// the item stays where it is.
    pub fn cancel(&mut self, container: &mut Container, strategy: &mut dyn LayoutStrategy) {
        if let Some(session) = self.session.take() {
            strategy.reattach(session.item);
            if let Some(placeholder) = session.placeholder {
                container.purge(placeholder);
            }
        }
    }
}
