//! Order submission.
//!
//! Assembles the final order payload from the cart manager's state and
//! hands it to the backend through the [`OrderGateway`] seam. The guard
//! chain guarantees complete checkout state before this runs, but the
//! preconditions are re-validated here so a guard bug degrades to an error
//! instead of a crash.

use rust_decimal::{Decimal, dec};

use mango_market_core::{Order, OrderDraft, OrderId, OrderItem};

use crate::api::OrderGateway;
use crate::cart::CartManager;
use crate::error::{Result, StoreError};

/// Minimum shipping price the backend accepts on an order document.
const SHIPPING_SENTINEL: Decimal = dec!(0.01);

/// Submit the current cart as an order.
///
/// On success the cart manager is cleared and the confirmed order is
/// returned (its id is the navigation target for the order-detail view).
/// On failure the cart is left untouched so the shopper can retry by
/// re-invoking the action; nothing retries automatically.
///
/// # Errors
///
/// `StoreError::Precondition` if the cart is empty or checkout data is
/// missing; otherwise whatever the gateway reports.
pub async fn place_order<G: OrderGateway>(
    gateway: &G,
    cart_manager: &mut CartManager,
) -> Result<Order> {
    let cart = cart_manager.cart();
    if cart.is_empty() {
        return Err(StoreError::Precondition("cart is empty"));
    }
    let shipping_address = cart_manager
        .shipping_address()
        .ok_or(StoreError::Precondition("no shipping address"))?
        .clone();
    let payment_method = cart_manager
        .payment_method()
        .ok_or(StoreError::Precondition("no payment method"))?;

    let totals = super::pricing::compute_totals(cart);
    let order_items = cart
        .items
        .iter()
        .map(|item| OrderItem {
            image: item.product.image.clone(),
            name: item.product.name.clone(),
            price: item.product.price,
            slug: item.product.slug.clone(),
            qty: item.qty,
        })
        .collect();

    let mut draft = OrderDraft {
        order_items,
        shipping_address,
        payment_method,
        totals,
    };
    // Transport quirk: the backend rejects non-positive shipping prices, so
    // a free-shipping order ships with a one-cent sentinel. This rewrite is
    // confined to the transmitted draft; the pricing engine and everything
    // shown to the shopper keep the true zero.
    if draft.totals.shipping_price <= Decimal::ZERO {
        draft.totals.shipping_price = SHIPPING_SENTINEL;
    }

    let order = gateway.submit_order(&draft).await?;
    tracing::info!(order_id = %order.id, total = %order.totals.total_price, "order placed");
    cart_manager.clear();
    Ok(order)
}

/// Mark an order as paid after the payment widget confirms payment.
///
/// # Errors
///
/// Propagates the gateway failure; the order state is unchanged on error.
pub async fn mark_paid<G: OrderGateway>(gateway: &G, order_id: &OrderId) -> Result<Order> {
    let order = gateway.pay_order(order_id).await?;
    tracing::info!(order_id = %order.id, "order marked paid");
    Ok(order)
}
