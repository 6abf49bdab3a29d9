//! Pricing engine.
//!
//! Pure derivation of the four order price fields from cart contents. No
//! side effects, deterministic for identical input. The submission-time
//! shipping sentinel (zero rewritten to a small positive value) is a
//! transport quirk of order submission and deliberately does NOT live here,
//! so this function reports true zero shipping for large carts.

use rust_decimal::{Decimal, dec};

use mango_market_core::{Cart, OrderTotals, round2};

/// Free shipping applies strictly above this items subtotal.
const FREE_SHIPPING_THRESHOLD: Decimal = dec!(200);

/// Flat shipping fee below the free-shipping threshold.
const FLAT_SHIPPING: Decimal = dec!(15);

/// Tax rate applied to the items subtotal.
const TAX_RATE: Decimal = dec!(0.15);

/// Compute items/shipping/tax/total prices for a cart.
#[must_use]
pub fn compute_totals(cart: &Cart) -> OrderTotals {
    let items_price = round2(
        cart.items
            .iter()
            .map(|item| item.product.price * Decimal::from(item.qty))
            .sum(),
    );
    let shipping_price = if items_price > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    };
    let tax_price = round2(items_price * TAX_RATE);
    let total_price = round2(items_price + shipping_price + tax_price);

    OrderTotals {
        items_price,
        shipping_price,
        tax_price,
        total_price,
    }
}
