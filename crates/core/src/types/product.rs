//! Catalog product type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product as served by the shop backend.
///
/// Immutable from the cart's perspective; the backend owns the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identity.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// URL-friendly handle used in product routes.
    pub slug: String,
    pub name: String,
    pub category: String,
    /// Primary image URL.
    pub image: String,
    /// Unit price, non-negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub brand: String,
    pub description: String,
    pub num_reviews: u32,
    pub rating: f32,
    /// Units currently in stock; the cart caps merged quantities at this.
    pub count_in_stock: u32,
}
