//! Frame coalescing and resize debounce, driven through the engine facade.

use mosaic_core::{Effect, GridEvent, InvalidationReason, Size};
use mosaic_grid::{MasonryGrid, RESIZE_DEBOUNCE, SelectionMode};
use mosaic_layout::Viewport;

fn sized() -> Size {
    Size::new(30.0, 30.0)
}

#[test]
fn many_signals_one_frame_one_pass() {
    let mut grid = MasonryGrid::new("fixed-centered", SelectionMode::Single);
    grid.notify_resized(Viewport::new(500.0, 10.0));

    // A burst of invalidations requests exactly one frame.
    let mut frame_requests = 0;
    for _ in 0..5 {
        let (_, update) = grid.insert_item(sized());
        frame_requests += update
            .effects
            .iter()
            .filter(|e| **e == Effect::RequestFrame)
            .count();
    }
    frame_requests += grid
        .schedule_layout(InvalidationReason::Manual)
        .effects
        .iter()
        .filter(|e| **e == Effect::RequestFrame)
        .count();
    assert_eq!(frame_requests, 1);

    // The frame runs one pass; all five entrances flush in one batch.
    let update = grid.run_frame();
    let entered: Vec<_> = update
        .events
        .iter()
        .filter_map(|e| match e {
            GridEvent::ItemsEntered(ids) => Some(ids.len()),
            _ => None,
        })
        .collect();
    assert_eq!(entered, vec![5]);

    // A second frame callback for the same burst is a no-op.
    let update = grid.run_frame();
    assert!(update.events.is_empty());
}

#[test]
fn resize_storm_restarts_the_debounce_timer() {
    let mut grid = MasonryGrid::new("fixed-centered", SelectionMode::Single);
    grid.insert_item(sized());
    grid.notify_resized(Viewport::new(500.0, 10.0));
    assert!(grid.layout_state().layouted);

    // Every resize in the storm re-arms the timer; none schedules a pass.
    for width in [480.0, 460.0, 440.0] {
        let update = grid.notify_resized(Viewport::new(width, 10.0));
        assert_eq!(update.effects, vec![Effect::StartDebounce(RESIZE_DEBOUNCE)]);
    }
    assert!(grid.layout_state().forced_debounce);
    assert!(!grid.layout_state().scheduled);

    // Only the last timer fires.
    let update = grid.debounce_elapsed();
    assert_eq!(update.effects, vec![Effect::RequestFrame]);
    assert!(!grid.layout_state().forced_debounce);
    assert!(grid.layout_state().scheduled);
}

#[test]
fn forced_pass_supersedes_a_scheduled_frame() {
    let mut grid = MasonryGrid::new("fixed-centered", SelectionMode::Single);
    grid.notify_resized(Viewport::new(500.0, 10.0));
    grid.set_visible(false);

    let (_, update) = grid.insert_item(sized());
    assert_eq!(update.effects, vec![Effect::RequestFrame]);

    // Becoming visible runs the pass immediately; the pending frame
    // callback then finds nothing to do.
    grid.set_visible(true);
    assert!(grid.layout_state().layouted);
    let update = grid.run_frame();
    assert!(update.events.is_empty());
    assert!(!grid.layout_state().scheduled);
}

#[test]
fn layout_state_reflects_loading_progress() {
    let mut grid = MasonryGrid::new("variable", SelectionMode::Single);
    let state = grid.layout_state();
    assert!(!state.loaded);
    assert!(!state.layouted);
    assert_eq!(state.active_strategy, "variable");

    grid.insert_item(sized());
    grid.notify_resized(Viewport::new(500.0, 10.0));
    let state = grid.layout_state();
    assert!(state.loaded);
    assert!(state.layouted);
}
