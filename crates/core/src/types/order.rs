//! Server-confirmed order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checkout::{OrderItem, OrderTotals, PaymentMethod, ShippingAddress};
use super::id::{OrderId, UserId};

/// An order as confirmed by the backend.
///
/// Echoes the submitted draft plus identity, payment/delivery status and
/// timestamps. The backend owns this record; the client only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// The purchasing user's identity.
    pub user: UserId,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub is_paid: bool,
    pub is_delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
