//! Cart contents: an ordered product/quantity sequence.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// A product plus the quantity the shopper selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub qty: u32,
}

/// The in-progress selection of products.
///
/// Ordered, unique by product identity: a product appears at most once and
/// repeated adds merge into its quantity. The cart manager in the `store`
/// crate is the policy layer that maintains those invariants; this type
/// models the data and serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all items (the badge count).
    #[must_use]
    pub fn units(&self) -> u32 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Find the position of a product in the cart.
    #[must_use]
    pub fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product.id == product_id)
    }

    /// Look up an item by product identity.
    #[must_use]
    pub fn find(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
