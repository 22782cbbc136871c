//! Property tests for the selection mode invariants.
//!
//! After any sequence of toggles and validation, the selection satisfies
//! the active mode's cardinality bound, and sibling stepping always
//! produces a usable item.

use mosaic_core::{SELECTED_MARKER, Selection, Size};
use mosaic_grid::{MasonryGrid, SelectionMode};
use proptest::prelude::*;

const ITEMS: usize = 6;

fn mode_strategy() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![
        Just(SelectionMode::None),
        Just(SelectionMode::Single),
        Just(SelectionMode::Multiple),
    ]
}

fn build_grid(mode: SelectionMode) -> (MasonryGrid, Vec<mosaic_core::ItemId>) {
    let mut grid = MasonryGrid::new("fixed-centered", mode);
    let ids = (0..ITEMS)
        .map(|_| grid.insert_item(Size::new(30.0, 30.0)).0)
        .collect();
    (grid, ids)
}

proptest! {
    #[test]
    fn selection_cardinality_matches_the_mode(
        mode in mode_strategy(),
        toggles in prop::collection::vec(0..ITEMS, 1..40),
    ) {
        let (mut grid, ids) = build_grid(mode);
        for at in toggles {
            grid.toggle_selected(ids[at]);
            let selected = grid.selectable().all_selected(SELECTED_MARKER);
            match mode {
                SelectionMode::None => prop_assert_eq!(selected.len(), 0),
                SelectionMode::Single => prop_assert!(selected.len() <= 1),
                SelectionMode::Multiple => {}
            }
        }
    }

    #[test]
    fn recorded_snapshot_tracks_the_markers(
        toggles in prop::collection::vec(0..ITEMS, 1..40),
    ) {
        let (mut grid, ids) = build_grid(SelectionMode::Multiple);
        for at in toggles {
            grid.toggle_selected(ids[at]);
        }
        let marked = grid.selectable().all_selected(SELECTED_MARKER);
        prop_assert_eq!(grid.selection(), &Selection::Multiple(marked));
    }

    #[test]
    fn sibling_stepping_is_total(
        disabled_mask in 0u8..64,
        start in 0..ITEMS,
    ) {
        let (mut grid, ids) = build_grid(SelectionMode::Single);
        for (i, id) in ids.iter().enumerate() {
            grid.set_disabled(*id, disabled_mask & (1 << i) != 0);
        }
        let sel = grid.selectable();
        let anchor = ids[start];
        // Never none: at a boundary (or fully disabled grid) the anchor
        // itself comes back.
        let prev = sel.previous_selectable(anchor);
        let next = sel.next_selectable(anchor);
        prop_assert!(ids.contains(&prev));
        prop_assert!(ids.contains(&next));
        // Whatever came back that isn't the anchor is selectable.
        for step in [prev, next] {
            if step != anchor {
                prop_assert!(
                    grid.container().get(step).unwrap().is_selectable()
                );
            }
        }
    }
}
