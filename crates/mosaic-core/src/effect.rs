//! Requests from the engine to its host.
//!
//! The engine never blocks and never reads a clock; deferral is expressed
//! as effects the host services with its frame and timer primitives.

use std::time::Duration;

/// A host request produced by an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the engine's frame callback once before the next paint.
    RequestFrame,
    /// Start (or restart) the resize-debounce timer. A pending timer is
    /// superseded: cancel it and arm a fresh one for the full interval.
    StartDebounce(Duration),
    /// Cancel the resize-debounce timer without firing it.
    CancelDebounce,
}
