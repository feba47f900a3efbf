//! Shopping cart accounting.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{CatalogIndex, Product};

/// Product identifier -> quantity mapping.
///
/// Ordered keys keep payload serialization and line iteration
/// deterministic. Stored quantities are always >= 1; an entry that would
/// reach zero is deleted instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, u32>,
}

/// One presentable cart row: the product, its quantity, and the line
/// total, so the rendering layer never does arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
    pub line_total: u64,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product, inserting the entry at quantity 1 if
    /// absent. Identifiers unknown to the index are rejected so the cart
    /// can never hold an entry with no backing product.
    pub fn add(&mut self, id: &str, index: &CatalogIndex) -> bool {
        if !index.contains(id) {
            return false;
        }
        *self.entries.entry(id.to_string()).or_insert(0) += 1;
        true
    }

    /// Remove one unit of a product; the entry disappears entirely when
    /// it would reach zero. Removing an absent entry is a no-op.
    /// Returns the remaining quantity (0 if the entry is gone).
    pub fn remove(&mut self, id: &str) -> u32 {
        let Some(quantity) = self.entries.get_mut(id) else {
            return 0;
        };
        if *quantity <= 1 {
            self.entries.remove(id);
            0
        } else {
            *quantity -= 1;
            *quantity
        }
    }

    /// Sum of price x quantity over current entries, recomputed fresh on
    /// every call.
    #[must_use]
    pub fn total(&self, index: &CatalogIndex) -> u64 {
        self.entries
            .iter()
            .filter_map(|(id, &quantity)| {
                index.get(id).map(|p| p.price * u64::from(quantity))
            })
            .sum()
    }

    /// Get the current quantity of a product in the cart.
    #[must_use]
    pub fn quantity(&self, id: &str) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clear the entire cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Raw (id, quantity) pairs in deterministic id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(id, &quantity)| (id.as_str(), quantity))
    }

    /// Presentable rows for the renderer, in deterministic id order.
    pub fn lines<'a>(&'a self, index: &'a CatalogIndex) -> impl Iterator<Item = CartLine<'a>> {
        self.entries.iter().filter_map(move |(id, &quantity)| {
            index.get(id).map(|product| CartLine {
                product,
                quantity,
                line_total: product.price * u64::from(quantity),
            })
        })
    }
}
