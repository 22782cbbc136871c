//! The grid facade the host drives.
//!
//! [`MasonryGrid`] owns the container, the strategy registry and active
//! strategy, the scheduler, the selection validator, and the drag
//! controller. Every host-facing operation returns an [`Update`]: the
//! events to report and the effects to service. The engine never calls
//! back into the host and never blocks.
//!
//! # Failure Modes
//!
//! - Unknown layout name: warn, keep the previous strategy.
//! - Operations on missing items: no-op.
//! - Frame with a hidden or unsized container: the pass is skipped and
//!   prior geometry kept; `layouted` stays false.

use crate::collection::ItemCollection;
use crate::drag::DragController;
use crate::scheduler::{LayoutScheduler, PassState, ResizeResponse};
use crate::selectable::SelectableCollection;
use crate::validator::{SelectionMode, SelectionValidator};
use mosaic_core::{
    ChangeBatch, ChangeRecord, Container, Effect, GridEvent, InvalidationReason, Item, ItemId,
    Point, Selection, Size,
};
use mosaic_layout::{FixedGrid, Justify, LayoutInput, LayoutRegistry, LayoutStrategy, Viewport};

/// Events and host requests produced by one engine operation.
#[derive(Debug, Default, PartialEq)]
pub struct Update {
    pub events: Vec<GridEvent>,
    pub effects: Vec<Effect>,
}

impl Update {
    fn merge(&mut self, other: Update) {
        self.events.extend(other.events);
        self.effects.extend(other.effects);
    }

    fn push_effect(&mut self, effect: Option<Effect>) {
        if let Some(effect) = effect {
            self.effects.push(effect);
        }
    }
}

/// Snapshot of the per-grid layout bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub scheduled: bool,
    pub forced_debounce: bool,
    pub active_strategy: String,
    /// The grid has a usable viewport.
    pub loaded: bool,
    /// At least one pass has completed.
    pub layouted: bool,
}

/// The adaptive grid engine.
#[derive(Debug)]
pub struct MasonryGrid {
    container: Container,
    registry: LayoutRegistry,
    strategy: Box<dyn LayoutStrategy>,
    strategy_name: String,
    viewport: Viewport,
    visible: bool,
    orderable: bool,
    scheduler: LayoutScheduler,
    validator: SelectionValidator,
    drag: DragController,
    focused: Option<ItemId>,
    /// Last laid-out center of the focused item, for neighbor recovery
    /// after the item is gone.
    focused_center: Option<Point>,
    in_pass: bool,
}

impl MasonryGrid {
    /// Engine with the built-in strategy registry.
    #[must_use]
    pub fn new(layout: &str, mode: SelectionMode) -> Self {
        Self::with_registry(LayoutRegistry::with_builtins(), layout, mode)
    }

    /// Engine over a caller-populated registry.
    ///
    /// An unknown initial layout name degrades to a centered fixed grid.
    #[must_use]
    pub fn with_registry(registry: LayoutRegistry, layout: &str, mode: SelectionMode) -> Self {
        let (strategy_name, strategy) = match registry.create(layout) {
            Some(strategy) => (layout.to_owned(), strategy),
            None => (
                "fixed-centered".to_owned(),
                registry.create("fixed-centered").unwrap_or_else(|| {
                    Box::new(FixedGrid::new(Justify::Centered)) as Box<dyn LayoutStrategy>
                }),
            ),
        };
        Self {
            container: Container::new(),
            registry,
            strategy,
            strategy_name,
            viewport: Viewport::default(),
            visible: true,
            orderable: false,
            scheduler: LayoutScheduler::new(),
            validator: SelectionValidator::new(mode),
            drag: DragController::new(),
            focused: None,
            focused_center: None,
            in_pass: false,
        }
    }

    // --- Views -----------------------------------------------------------

    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Default-filtered collection view.
    #[must_use]
    pub fn items(&self) -> ItemCollection<'_> {
        ItemCollection::new(&self.container)
    }

    /// Selection queries over the current items.
    #[must_use]
    pub fn selectable(&self) -> SelectableCollection<'_> {
        SelectableCollection::new(&self.container)
    }

    /// The last validated selection snapshot.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.validator.selection()
    }

    #[must_use]
    pub fn layout_state(&self) -> LayoutState {
        LayoutState {
            scheduled: self.scheduler.state() == PassState::Scheduled,
            forced_debounce: self.scheduler.forced_debounce(),
            active_strategy: self.strategy_name.clone(),
            loaded: self.viewport.width > 0.0,
            layouted: self.scheduler.is_layouted(),
        }
    }

    #[must_use]
    pub fn focused(&self) -> Option<ItemId> {
        self.focused
    }

    // --- Structure -------------------------------------------------------

    /// Append an item with the given natural size.
    pub fn insert_item(&mut self, content_size: Size) -> (ItemId, Update) {
        let index = self.container.len();
        self.insert_item_at(index, content_size)
    }

    /// Insert an item at a document-order position.
    pub fn insert_item_at(&mut self, index: usize, content_size: Size) -> (ItemId, Update) {
        let id = self.container.insert_at(index, content_size);
        let mut update = Update::default();
        if let Some(change) = self.validator.validate(&mut self.container, None) {
            update.events.push(GridEvent::SelectionChanged(change));
        }
        update.push_effect(self.scheduler.invalidate(InvalidationReason::Mutation));
        (id, update)
    }

    /// Begin an item's removal transition.
    pub fn remove_item(&mut self, id: ItemId) -> Update {
        let mut update = Update::default();
        if !self.container.mark_removing(id) {
            return update;
        }
        if let Some(change) = self.validator.validate(&mut self.container, None) {
            update.events.push(GridEvent::SelectionChanged(change));
        }
        update.push_effect(self.scheduler.invalidate(InvalidationReason::Mutation));
        update
    }

    /// The removal transition finished: drop the item for good.
    pub fn removal_complete(&mut self, id: ItemId) -> Update {
        let mut update = Update::default();
        if self.container.purge(id) {
            update.push_effect(self.scheduler.invalidate(InvalidationReason::Mutation));
        }
        update
    }

    /// An item's content finished loading with a new natural size.
    pub fn content_loaded(&mut self, id: ItemId, size: Size) -> Update {
        let mut update = Update::default();
        if let Some(item) = self.container.get_mut(id) {
            item.content_size = size;
            update.push_effect(self.scheduler.invalidate(InvalidationReason::ContentLoaded));
        }
        update
    }

    /// Apply a batch of observed subtree changes.
    ///
    /// Batches produced by the engine's own pass writes are dropped to
    /// prevent a self-triggered re-layout loop.
    pub fn apply_changes(&mut self, batch: ChangeBatch) -> Update {
        let mut update = Update::default();
        if self.in_pass {
            return update;
        }
        for record in batch {
            let step = match record {
                ChangeRecord::ChildAdded {
                    index,
                    content_size,
                } => self.insert_item_at(index, content_size).1,
                ChangeRecord::ChildRemoved { item } => self.remove_item(item),
                ChangeRecord::MarkerChanged { item, marker, on } => {
                    self.set_marker(item, &marker, on)
                }
                ChangeRecord::ContentLoaded { item, size } => self.content_loaded(item, size),
            };
            update.merge(step);
        }
        update
    }

    // --- Selection -------------------------------------------------------

    /// Set or clear a marker on an item. Disabled items accept direct
    /// toggles; only keyboard-navigation queries skip them.
    pub fn set_marker(&mut self, id: ItemId, marker: &str, on: bool) -> Update {
        let mut update = Update::default();
        let Some(item) = self.container.get_mut(id) else {
            return update;
        };
        if !item.set_marker(marker, on) {
            return update;
        }
        if marker == self.validator.marker() {
            let changed = on.then_some(id);
            if let Some(change) = self.validator.validate(&mut self.container, changed) {
                update.events.push(GridEvent::SelectionChanged(change));
            }
        }
        update
    }

    /// Toggle the validator's selection marker on an item.
    pub fn toggle_selected(&mut self, id: ItemId) -> Update {
        let marker = self.validator.marker().to_owned();
        let on = !self
            .container
            .get(id)
            .is_some_and(|item| item.has_marker(&marker));
        self.set_marker(id, &marker, on)
    }

    /// Set or clear an item's disabled flag.
    ///
    /// Disabled items keep their markers and accept direct toggles; they
    /// only drop out of the keyboard-navigation selectable queries.
    pub fn set_disabled(&mut self, id: ItemId, disabled: bool) -> Update {
        if let Some(item) = self.container.get_mut(id) {
            item.set_disabled(disabled);
        }
        Update::default()
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) -> Update {
        let mut update = Update::default();
        if self.validator.mode() == mode {
            return update;
        }
        self.validator.set_mode(mode);
        if let Some(change) = self.validator.validate(&mut self.container, None) {
            update.events.push(GridEvent::SelectionChanged(change));
        }
        update
    }

    /// Focus an item, making it the single tabbable entry.
    pub fn set_focus(&mut self, id: ItemId) -> Update {
        if let Some(item) = self.container.get(id)
            && item.is_unit()
        {
            self.focused = Some(id);
            self.focused_center = Some(item.rect.center());
            self.container.set_tabbable(id);
        }
        Update::default()
    }

    // --- Layout ----------------------------------------------------------

    /// Switch the active layout strategy.
    ///
    /// The previous instance is destroyed; nothing migrates. An unknown
    /// name keeps the previous strategy (warned by the registry).
    pub fn set_layout(&mut self, name: &str) -> Update {
        let mut update = Update::default();
        if name == self.strategy_name {
            return update;
        }
        let Some(strategy) = self.registry.create(name) else {
            return update;
        };
        self.strategy = strategy;
        self.strategy_name = name.to_owned();
        // The fresh instance has no detached set; restore the live drag.
        if let Some(session) = self.drag.session() {
            self.strategy.detach(session.item);
        }
        update.push_effect(self.scheduler.invalidate(InvalidationReason::Manual));
        update
    }

    /// Enable or disable drag reorder. Disabling cancels a live drag.
    pub fn set_orderable(&mut self, orderable: bool) -> Update {
        let mut update = Update::default();
        if self.orderable == orderable {
            return update;
        }
        self.orderable = orderable;
        if !orderable {
            self.drag.cancel(&mut self.container, self.strategy.as_mut());
        }
        update.push_effect(
            self.scheduler
                .invalidate(InvalidationReason::OrderableToggled),
        );
        update
    }

    /// Host-driven invalidation.
    pub fn schedule_layout(&mut self, reason: InvalidationReason) -> Update {
        let mut update = Update::default();
        update.push_effect(self.scheduler.invalidate(reason));
        update
    }

    /// The container was resized. Before the first completed pass this
    /// runs a pass immediately; afterwards it debounces.
    pub fn notify_resized(&mut self, viewport: Viewport) -> Update {
        self.viewport = viewport;
        match self.scheduler.notify_resized() {
            ResizeResponse::RunNow => self.run_forced_pass(),
            ResizeResponse::Debounce(effect) => {
                let mut update = Update::default();
                update.effects.push(effect);
                update
            }
        }
    }

    /// The resize-debounce timer fired.
    pub fn debounce_elapsed(&mut self) -> Update {
        let mut update = Update::default();
        update.push_effect(self.scheduler.debounce_elapsed());
        update
    }

    /// The host's visibility probe changed. Becoming visible runs an
    /// immediate pass: a hidden container cannot produce valid geometry.
    pub fn set_visible(&mut self, visible: bool) -> Update {
        let was = self.visible;
        self.visible = visible;
        if visible && !was {
            self.run_forced_pass()
        } else {
            Update::default()
        }
    }

    /// The frame callback fired. A no-op unless a pass is still scheduled.
    pub fn run_frame(&mut self) -> Update {
        if !self.scheduler.begin_frame() {
            return Update::default();
        }
        self.run_pass()
    }

    fn run_forced_pass(&mut self) -> Update {
        if !self.scheduler.force() {
            return Update::default();
        }
        self.run_pass()
    }

    /// One layout pass. The scheduler is in `Running` on entry.
    fn run_pass(&mut self) -> Update {
        let mut update = Update::default();
        if !self.visible || self.viewport.width <= 0.0 {
            self.scheduler.finish_pass(false);
            return update;
        }
        self.in_pass = true;

        // 1. Flush entrance transitions in one batch.
        let mut entered = Vec::new();
        for item in self.container.iter_mut() {
            if item.take_pending_enter() {
                entered.push(item.id());
            }
        }
        if !entered.is_empty() {
            update.events.push(GridEvent::ItemsEntered(entered));
        }

        // 2. Geometry. Removing items are out of flow; the placeholder
        // stays in (it marks the drop slot), the dragged item is excluded
        // by the strategy's detached set.
        let inputs: Vec<LayoutInput> = self
            .container
            .iter()
            .filter(|it| !it.is_removing())
            .map(|it| LayoutInput {
                id: it.id(),
                size: it.content_size,
            })
            .collect();
        let placements = self.strategy.layout(&self.viewport, &inputs);

        // 3. Apply and mark managed.
        for placement in &placements {
            if let Some(item) = self.container.get_mut(placement.id) {
                item.rect = placement.rect;
                item.mark_managed();
            }
        }

        // 4. Recompute the tabbable item if the previous one is gone.
        if self.container.tabbable().is_none() {
            let first = SelectableCollection::new(&self.container).first_selectable();
            if let Some(first) = first {
                self.container.set_tabbable(first);
            }
        }

        // 5. Re-focus a geometric neighbor if the focused item is gone.
        self.recover_focus();

        self.in_pass = false;
        self.scheduler.finish_pass(true);
        update
    }

    fn recover_focus(&mut self) {
        let Some(focused) = self.focused else {
            return;
        };
        let alive = self.container.get(focused).is_some_and(Item::is_unit);
        if alive {
            self.focused_center = self
                .container
                .get(focused)
                .map(|item| item.rect.center());
            return;
        }
        let Some(anchor) = self.focused_center else {
            self.focused = None;
            return;
        };
        let neighbor = self
            .container
            .iter()
            .filter(|it| it.is_unit())
            .min_by(|a, b| {
                anchor
                    .distance_to(a.rect.center())
                    .total_cmp(&anchor.distance_to(b.rect.center()))
            })
            .map(Item::id);
        self.focused = neighbor;
        if let Some(id) = neighbor {
            self.container.set_tabbable(id);
            self.focused_center = self.container.get(id).map(|item| item.rect.center());
        } else {
            self.focused_center = None;
        }
    }

    // --- Drag ------------------------------------------------------------

    /// Begin dragging an item. Requires the grid to be orderable.
    pub fn drag_start(&mut self, id: ItemId) -> Update {
        let mut update = Update::default();
        if !self.orderable {
            return update;
        }
        if self
            .drag
            .start(&mut self.container, self.strategy.as_mut(), id)
        {
            update.push_effect(self.scheduler.invalidate(InvalidationReason::Mutation));
        }
        update
    }

    /// Track a drag pointer move.
    pub fn drag_move(&mut self, pointer: Point) -> Update {
        let mut update = Update::default();
        if self
            .drag
            .update(&mut self.container, self.strategy.as_mut(), pointer)
        {
            update.push_effect(self.scheduler.invalidate(InvalidationReason::Mutation));
        }
        update
    }

    /// Finish a drag. A drag-end without a session is a silent no-op.
    pub fn drag_end(&mut self) -> Update {
        let mut update = Update::default();
        if let Some(change) = self.drag.end(&mut self.container, self.strategy.as_mut()) {
            update.events.push(GridEvent::OrderChanged(change));
            update.push_effect(self.scheduler.invalidate(InvalidationReason::Mutation));
        }
        update
    }
}
