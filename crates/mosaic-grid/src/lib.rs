#![forbid(unsafe_code)]

//! The Mosaic grid engine.
//!
//! # Role in Mosaic
//! `mosaic-grid` wires the data layer and the layout strategies into the
//! adaptive grid component's core: collection queries, the selection state
//! machine, frame-coalesced layout scheduling, and live drag reorder.
//!
//! # Primary responsibilities
//! - **ItemCollection / SelectableCollection**: filtered, ordered views
//!   over a container with selection-predicate queries.
//! - **SelectionValidator**: enforces the `none`/`single`/`multiple` mode
//!   invariants after every selection-affecting mutation.
//! - **LayoutScheduler**: coalesces invalidation signals into at most one
//!   layout pass per frame, with a resize debounce and a forced bypass for
//!   visibility transitions.
//! - **DragController**: placeholder tracking with weighted-distance
//!   hysteresis and order-change reporting.
//! - **MasonryGrid**: the facade the host drives; every operation returns
//!   the events to report and the effects to service.
//!
//! # Concurrency model
//! Single-threaded and frame-driven. The engine never blocks and never
//! reads a clock; deferral is expressed as [`Effect`](mosaic_core::Effect)
//! requests the host services with its frame and timer primitives.

pub mod collection;
pub mod drag;
pub mod engine;
pub mod scheduler;
pub mod selectable;
pub mod validator;

pub use collection::{CollectionFilter, ItemCollection};
pub use drag::{DragController, DragSession};
pub use engine::{LayoutState, MasonryGrid, Update};
pub use scheduler::{LayoutScheduler, PassState, RESIZE_DEBOUNCE, ResizeResponse};
pub use selectable::{
    SelectableCollection, deselect_all_except, keep_first_selected, keep_last_selected,
};
pub use validator::{SelectionMode, SelectionValidator};
