//! Item registry - what has been declared so far in one file.
//!
//! Items are appended in declaration order while the file is evaluated and
//! never removed. A query sees exactly the items appended before it, which
//! is what makes "declared earlier in the same file" the visibility rule.
//! When the file finishes, the registry is handed over read-only.

use crate::core::item::Item;
use crate::core::label::Label;

/// Ordered, append-only collection of declared items.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
}

impl ItemRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        ItemRegistry { items: Vec::new() }
    }

    /// Add an item after everything declared so far.
    ///
    /// The caller guarantees no item with the same label is present;
    /// duplicate detection happens where items are declared.
    pub fn append(&mut self, item: Item) {
        debug_assert!(
            self.find(item.label()).is_none(),
            "duplicate item {}",
            item.label()
        );
        self.items.push(item);
    }

    /// Find the first item with `label`, scanning in declaration order.
    pub fn find(&self, label: &Label) -> Option<&Item> {
        self.items.iter().find(|item| item.label() == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
