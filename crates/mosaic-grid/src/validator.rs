//! Selection mode enforcement.
//!
//! The validator runs after every selection-affecting mutation (toggle,
//! programmatic marker change, insertion, removal) and normalizes the
//! container to its mode's invariant.
//!
//! # Invariants
//!
//! 1. `none` ⇒ no item carries the marker; synthetic clears never notify.
//! 2. `single` ⇒ at most one non-removing item carries the marker.
//! 3. `multiple` ⇒ unconstrained.
//! 4. At most one change event per validation, and only when the computed
//!    selection differs from the recorded one in size or membership.

use crate::selectable::{SelectableCollection, deselect_all_except};
use mosaic_core::{Container, ItemId, SELECTED_MARKER, Selection, SelectionChange};

/// How many items may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selection is disabled; stray markers are cleared silently.
    None,
    /// At most one item selected; the most recent toggle wins.
    #[default]
    Single,
    /// Any number of items selected.
    Multiple,
}

/// Normalizes selection state and reports deduplicated change events.
#[derive(Debug)]
pub struct SelectionValidator {
    mode: SelectionMode,
    marker: String,
    recorded: Selection,
    suppress: bool,
}

impl SelectionValidator {
    /// Validator over the default `"selected"` marker.
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self::with_marker(mode, SELECTED_MARKER)
    }

    /// Validator over a custom marker (e.g. `"active"`).
    #[must_use]
    pub fn with_marker(mode: SelectionMode, marker: impl Into<String>) -> Self {
        Self {
            mode,
            marker: marker.into(),
            recorded: empty_selection(mode),
            suppress: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch modes. Change detection compares membership, not snapshot
    /// shape, so a mode switch alone never reports a change; the next
    /// `validate` call normalizes the container to the new invariant.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// The marker this validator normalizes.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether change events are currently suppressed.
    #[must_use]
    pub fn suppressed(&self) -> bool {
        self.suppress
    }

    /// Suppress or re-enable change events. While suppressed, validation
    /// still normalizes and records, but emits nothing.
    pub fn set_suppressed(&mut self, suppress: bool) {
        self.suppress = suppress;
    }

    /// Last recorded selection snapshot.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.recorded
    }

    /// Normalize the container and report a change event if the selection
    /// moved.
    ///
    /// `changed` names the most recently toggled item, which `single`
    /// mode keeps when trimming a multi-selection; with no hint the last
    /// selected item in document order survives.
    pub fn validate(
        &mut self,
        container: &mut Container,
        changed: Option<ItemId>,
    ) -> Option<SelectionChange> {
        match self.mode {
            SelectionMode::None => {
                // Synthetic clears, never notified.
                deselect_all_except(container, None, &self.marker);
            }
            SelectionMode::Single => {
                let selected = SelectableCollection::new(container).all_selected(&self.marker);
                if selected.len() > 1 {
                    let survivor = changed
                        .filter(|id| selected.contains(id))
                        .or_else(|| selected.last().copied());
                    deselect_all_except(container, survivor, &self.marker);
                }
            }
            SelectionMode::Multiple => {}
        }

        let computed = self.snapshot(container);
        let moved = membership(&computed) != membership(&self.recorded);
        let event = if moved && !self.suppress {
            Some(SelectionChange {
                old_selection: self.recorded.clone(),
                selection: computed.clone(),
            })
        } else {
            None
        };
        self.recorded = computed;
        event
    }

    fn snapshot(&self, container: &Container) -> Selection {
        let sel = SelectableCollection::new(container);
        match self.mode {
            SelectionMode::None => Selection::Single(None),
            SelectionMode::Single => Selection::Single(sel.first_selected(&self.marker)),
            SelectionMode::Multiple => Selection::Multiple(sel.all_selected(&self.marker)),
        }
    }
}

fn empty_selection(mode: SelectionMode) -> Selection {
    match mode {
        SelectionMode::Multiple => Selection::Multiple(Vec::new()),
        _ => Selection::Single(None),
    }
}

/// Membership of a snapshot, shape-independent, for change detection.
fn membership(selection: &Selection) -> Vec<ItemId> {
    match selection {
        Selection::Single(None) => Vec::new(),
        Selection::Single(Some(id)) => vec![*id],
        Selection::Multiple(ids) => ids.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Size;

    fn three(c: &mut Container) -> (ItemId, ItemId, ItemId) {
        let s = Size::new(10.0, 10.0);
        (c.push(s), c.push(s), c.push(s))
    }

    fn select(c: &mut Container, id: ItemId) {
        c.get_mut(id).unwrap().set_marker(SELECTED_MARKER, true);
    }

    #[test]
    fn none_mode_clears_without_notifying() {
        let mut c = Container::new();
        let (a, _, _) = three(&mut c);
        select(&mut c, a);

        let mut v = SelectionValidator::new(SelectionMode::None);
        assert_eq!(v.validate(&mut c, Some(a)), None);
        assert!(!c.get(a).unwrap().has_marker(SELECTED_MARKER));
        assert_eq!(v.selection(), &Selection::Single(None));
    }

    #[test]
    fn single_mode_keeps_the_most_recent_toggle() {
        let mut c = Container::new();
        let (a, b, _) = three(&mut c);
        select(&mut c, a);
        select(&mut c, b);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        let change = v.validate(&mut c, Some(b)).expect("selection moved");
        assert_eq!(change.selection, Selection::Single(Some(b)));
        assert!(!c.get(a).unwrap().has_marker(SELECTED_MARKER));
    }

    #[test]
    fn single_mode_without_hint_keeps_last_in_document_order() {
        let mut c = Container::new();
        let (a, _, d) = three(&mut c);
        select(&mut c, a);
        select(&mut c, d);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        let change = v.validate(&mut c, None).expect("selection moved");
        assert_eq!(change.selection, Selection::Single(Some(d)));
    }

    #[test]
    fn multiple_mode_reports_a_set() {
        let mut c = Container::new();
        let (a, b, _) = three(&mut c);
        select(&mut c, a);
        select(&mut c, b);

        let mut v = SelectionValidator::new(SelectionMode::Multiple);
        let change = v.validate(&mut c, Some(b)).expect("selection moved");
        assert_eq!(change.selection, Selection::Multiple(vec![a, b]));
        assert_eq!(change.old_selection, Selection::Multiple(Vec::new()));
    }

    #[test]
    fn unchanged_selection_emits_nothing() {
        let mut c = Container::new();
        let (a, _, _) = three(&mut c);
        select(&mut c, a);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        assert!(v.validate(&mut c, Some(a)).is_some());
        assert!(v.validate(&mut c, Some(a)).is_none());
        assert!(v.validate(&mut c, None).is_none());
    }

    #[test]
    fn suppressed_validation_records_but_stays_silent() {
        let mut c = Container::new();
        let (a, _, _) = three(&mut c);
        select(&mut c, a);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        v.set_suppressed(true);
        assert!(v.validate(&mut c, Some(a)).is_none());
        v.set_suppressed(false);
        // Already recorded while suppressed: still no event.
        assert!(v.validate(&mut c, Some(a)).is_none());
    }

    #[test]
    fn removing_a_selected_item_reports_the_shrink() {
        let mut c = Container::new();
        let (a, _, _) = three(&mut c);
        select(&mut c, a);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        v.validate(&mut c, Some(a));
        c.mark_removing(a);
        let change = v.validate(&mut c, None).expect("selection shrank");
        assert_eq!(change.old_selection, Selection::Single(Some(a)));
        assert_eq!(change.selection, Selection::Single(None));
    }

    #[test]
    fn mode_switch_alone_reports_no_change() {
        let mut c = Container::new();
        let (a, _, _) = three(&mut c);
        select(&mut c, a);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        v.validate(&mut c, Some(a));
        v.set_mode(SelectionMode::Multiple);
        // Same membership, different shape: no event.
        assert!(v.validate(&mut c, None).is_none());
        assert_eq!(v.selection(), &Selection::Multiple(vec![a]));
    }

    #[test]
    fn disabled_items_accept_direct_toggles() {
        let mut c = Container::new();
        let (a, _, _) = three(&mut c);
        c.get_mut(a).unwrap().set_disabled(true);
        select(&mut c, a);

        let mut v = SelectionValidator::new(SelectionMode::Single);
        let change = v.validate(&mut c, Some(a)).expect("disabled item selected");
        assert_eq!(change.selection, Selection::Single(Some(a)));
    }

    #[test]
    fn custom_marker_validator() {
        let mut c = Container::new();
        let (a, b, _) = three(&mut c);
        c.get_mut(a).unwrap().set_marker("active", true);
        c.get_mut(b).unwrap().set_marker("active", true);

        let mut v = SelectionValidator::with_marker(SelectionMode::Single, "active");
        let change = v.validate(&mut c, Some(a)).expect("normalized");
        assert_eq!(change.selection, Selection::Single(Some(a)));
        assert!(!c.get(b).unwrap().has_marker("active"));
    }
}
