//! Named strategy registry.
//!
//! Maps layout names to strategy factories. The registry is populated at
//! startup and read-only afterwards; the grid creates a fresh strategy
//! instance on every lookup, so no state survives a strategy switch.
//!
//! # Invariants
//!
//! 1. Each name maps to at most one factory; re-registering a name
//!    replaces the previous factory.
//! 2. Unknown-name lookups are non-fatal: [`create`](LayoutRegistry::create)
//!    logs a warning and returns `None`, and callers keep their previous
//!    strategy active.

use crate::fixed::{FixedGrid, Justify};
use crate::{Dashboard, LayoutStrategy, VariableColumns};
use rustc_hash::FxHashMap;

/// Constructor for one strategy instance.
pub type StrategyFactory = Box<dyn Fn() -> Box<dyn LayoutStrategy>>;

/// Registry of layout names to strategy factories.
pub struct LayoutRegistry {
    factories: FxHashMap<String, StrategyFactory>,
}

impl std::fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl LayoutRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Create a registry holding the four built-in strategies:
    /// `fixed-centered`, `fixed-spread`, `variable`, and `dashboard`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register("fixed-centered", || {
            Box::new(FixedGrid::new(Justify::Centered))
        });
        reg.register("fixed-spread", || Box::new(FixedGrid::new(Justify::Spread)));
        reg.register("variable", || Box::new(VariableColumns::new()));
        reg.register("dashboard", || Box::new(Dashboard::new()));
        reg
    }

    /// Register a strategy factory under a name, replacing any previous
    /// registration for that name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn LayoutStrategy> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Whether a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct a fresh strategy instance for `name`.
    ///
    /// Returns `None` (after logging a warning) for an unknown name; the
    /// caller keeps its previous strategy.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Box<dyn LayoutStrategy>> {
        match self.factories.get(name) {
            Some(factory) => Some(factory()),
            None => {
                tracing::warn!(layout = name, "unknown layout name, keeping previous");
                None
            }
        }
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let reg = LayoutRegistry::with_builtins();
        for name in ["fixed-centered", "fixed-spread", "variable", "dashboard"] {
            assert!(reg.contains(name), "missing builtin {name}");
            assert_eq!(reg.create(name).map(|s| s.name()), Some(name));
        }
    }

    #[test]
    fn unknown_name_returns_none() {
        let reg = LayoutRegistry::with_builtins();
        assert!(reg.create("carousel").is_none());
    }

    #[test]
    fn create_returns_fresh_instances() {
        let reg = LayoutRegistry::with_builtins();
        let mut a = reg.create("variable").unwrap();
        let b = reg.create("variable").unwrap();
        // Run a pass on one; the other must have no retained geometry.
        let items = [crate::LayoutInput {
            id: mosaic_core::ItemId(0),
            size: mosaic_core::Size::new(10.0, 10.0),
        }];
        a.layout(&crate::Viewport::new(100.0, 0.0), &items);
        assert!(a.item_at(mosaic_core::Point::new(5.0, 5.0)).is_some());
        assert!(b.item_at(mosaic_core::Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn re_registering_replaces() {
        let mut reg = LayoutRegistry::new();
        reg.register("grid", || Box::new(FixedGrid::new(Justify::Centered)));
        reg.register("grid", || Box::new(FixedGrid::new(Justify::Spread)));
        assert_eq!(reg.create("grid").map(|s| s.name()), Some("fixed-spread"));
    }
}
