#![forbid(unsafe_code)]

//! Core: geometry, the item/container data model, and host interfaces.
//!
//! # Role in Mosaic
//! `mosaic-core` is the data layer. It owns the item tree that the grid
//! engine arranges, the change-notification records the host feeds in, and
//! the effect/event types that flow back out.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`/`Size`/`Rect` in surface coordinates, plus the
//!   weighted-distance metric used for drag tracking and focus recovery.
//! - **Item / Container**: the ordered, insertion-order-preserving item
//!   store with state flags and selection markers.
//! - **Change records**: batched structural/attribute notifications from
//!   the host's observed subtree.
//! - **Effects and events**: what the engine asks of the host (frame
//!   callbacks, debounce timers) and what it reports (selection and order
//!   changes).
//!
//! # How it fits in the system
//! The layout crate (`mosaic-layout`) positions items described by this
//! crate; the engine (`mosaic-grid`) mutates the container and consumes
//! change records, emitting effects and events back to the host.

pub mod change;
pub mod container;
pub mod effect;
pub mod events;
pub mod geometry;
pub mod item;

pub use change::{ChangeBatch, ChangeRecord, InvalidationReason};
pub use container::Container;
pub use effect::Effect;
pub use events::{GridEvent, OrderChange, Selection, SelectionChange};
pub use geometry::{Point, Rect, Size};
pub use item::{Item, ItemFlags, ItemId, SELECTED_MARKER};
