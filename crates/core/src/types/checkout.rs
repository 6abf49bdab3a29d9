//! Checkout data: shipping address, payment method, priced order draft.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shipping destination collected during the checkout `shipping` step.
///
/// All fields are required; the form layer enforces non-empty values before
/// the address is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// The closed set of supported payment methods.
///
/// Stored and transmitted as its plain string name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    PayPal,
    Stripe,
    Cash,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PayPal => "PayPal",
            Self::Stripe => "Stripe",
            Self::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a payment method name.
#[derive(Debug, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PayPal" => Ok(Self::PayPal),
            "Stripe" => Ok(Self::Stripe),
            "Cash" => Ok(Self::Cash),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// The four derived price fields computed by the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub items_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// A cart entry flattened to the display fields the backend stores per order
/// line. Product identity is intentionally not sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub image: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub slug: String,
    pub qty: u32,
}

/// The `POST /orders` request body: cart lines plus checkout data plus the
/// derived prices. Derived at submission time, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub totals: OrderTotals,
}
