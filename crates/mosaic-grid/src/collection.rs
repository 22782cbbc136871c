//! Ordered, filtered view over a container's items.

use mosaic_core::{Container, Item, ItemId};

/// Which transient entries a collection hides.
///
/// The default hides both removal-transition items and drag placeholders,
/// which is what every selection query wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionFilter {
    pub skip_removing: bool,
    pub skip_placeholder: bool,
}

impl Default for CollectionFilter {
    fn default() -> Self {
        Self {
            skip_removing: true,
            skip_placeholder: true,
        }
    }
}

impl CollectionFilter {
    /// Build a filter from named options.
    ///
    /// Supported names are `"removing"` and `"placeholder"`. An unknown
    /// name logs a warning and is ignored; the collection proceeds without
    /// that filter.
    #[must_use]
    pub fn from_names(names: &[&str]) -> Self {
        let mut filter = Self {
            skip_removing: false,
            skip_placeholder: false,
        };
        for name in names {
            match *name {
                "removing" => filter.skip_removing = true,
                "placeholder" => filter.skip_placeholder = true,
                other => {
                    tracing::warn!(filter = other, "unsupported collection filter, ignoring");
                }
            }
        }
        filter
    }

    /// Whether an item passes this filter.
    #[must_use]
    pub fn admits(&self, item: &Item) -> bool {
        !(self.skip_removing && item.is_removing()
            || self.skip_placeholder && item.is_placeholder())
    }
}

/// Read-through view over a container's items in document order.
///
/// Never a copy: the view borrows the container and reflects its current
/// state on every query.
#[derive(Debug, Clone, Copy)]
pub struct ItemCollection<'a> {
    container: &'a Container,
    filter: CollectionFilter,
}

impl<'a> ItemCollection<'a> {
    /// View with the default filter (transient items hidden).
    #[must_use]
    pub fn new(container: &'a Container) -> Self {
        Self {
            container,
            filter: CollectionFilter::default(),
        }
    }

    /// View with a filter built from named options.
    #[must_use]
    pub fn with_filters(container: &'a Container, names: &[&str]) -> Self {
        Self {
            container,
            filter: CollectionFilter::from_names(names),
        }
    }

    #[must_use]
    pub fn filter(&self) -> CollectionFilter {
        self.filter
    }

    /// Admitted items in document order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a Item> + '_ {
        self.container.iter().filter(|it| self.filter.admits(it))
    }

    /// Admitted item ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.iter().map(Item::id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.iter().any(|it| it.id() == id)
    }

    #[must_use]
    pub fn first(&self) -> Option<&'a Item> {
        self.iter().next()
    }

    #[must_use]
    pub fn last(&self) -> Option<&'a Item> {
        self.iter().last()
    }

    /// Nearest admitted item before `id` in document order.
    #[must_use]
    pub fn prev(&self, id: ItemId) -> Option<ItemId> {
        let at = self.container.position(id)?;
        self.container
            .iter()
            .take(at)
            .filter(|it| self.filter.admits(it))
            .last()
            .map(Item::id)
    }

    /// Nearest admitted item after `id` in document order.
    #[must_use]
    pub fn next(&self, id: ItemId) -> Option<ItemId> {
        let at = self.container.position(id)?;
        self.container
            .iter()
            .skip(at + 1)
            .find(|it| self.filter.admits(it))
            .map(Item::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Size;

    fn sized() -> Size {
        Size::new(10.0, 10.0)
    }

    #[test]
    fn default_filter_hides_transients() {
        let mut c = Container::new();
        let a = c.push(sized());
        let b = c.push(sized());
        let d = c.push(sized());
        c.mark_removing(b);
        c.insert_placeholder_before(d);

        let view = ItemCollection::new(&c);
        let ids: Vec<_> = view.ids().collect();
        assert_eq!(ids, vec![a, d]);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn named_filters_compose() {
        let mut c = Container::new();
        let a = c.push(sized());
        c.mark_removing(a);

        let only_placeholder = ItemCollection::with_filters(&c, &["placeholder"]);
        assert!(only_placeholder.contains(a));
        let both = ItemCollection::with_filters(&c, &["placeholder", "removing"]);
        assert!(!both.contains(a));
    }

    #[test]
    fn unknown_filter_name_degrades() {
        let mut c = Container::new();
        let a = c.push(sized());
        c.mark_removing(a);
        // Unknown name is ignored; no filtering happens.
        let view = ItemCollection::with_filters(&c, &["hidden"]);
        assert!(view.contains(a));
    }

    #[test]
    fn sibling_stepping_skips_transients() {
        let mut c = Container::new();
        let a = c.push(sized());
        let b = c.push(sized());
        let d = c.push(sized());
        c.mark_removing(b);

        let view = ItemCollection::new(&c);
        assert_eq!(view.next(a), Some(d));
        assert_eq!(view.prev(d), Some(a));
        assert_eq!(view.prev(a), None);
        assert_eq!(view.next(d), None);
    }

    #[test]
    fn stepping_from_a_transient_anchor_still_works() {
        let mut c = Container::new();
        let a = c.push(sized());
        let b = c.push(sized());
        c.mark_removing(b);
        // The anchor itself need not be admitted.
        let view = ItemCollection::new(&c);
        assert_eq!(view.prev(b), Some(a));
    }
}
