//! Cart manager.
//!
//! Owns the in-memory cart plus the collected checkout data (shipping
//! address, payment method) and mirrors every mutation into the persisted
//! session store. All operations are synchronous and write through
//! immediately; callers get the updated cart view back.

use std::str::FromStr;

use mango_market_core::{Cart, CartItem, PaymentMethod, Product, ProductId, ShippingAddress};

use crate::session::{self, SessionStore, SharedStore, keys};

/// The cart state manager.
///
/// The session store is injected rather than read ambiently so tests can
/// supply an isolated fake. On construction the manager restores whatever
/// the store holds; a missing or corrupt record restores as empty.
pub struct CartManager {
    store: SharedStore,
    cart: Cart,
    shipping_address: Option<ShippingAddress>,
    payment_method: Option<PaymentMethod>,
}

impl CartManager {
    /// Create a manager, restoring persisted state from the session store.
    #[must_use]
    pub fn restore(store: SharedStore) -> Self {
        let cart = session::read_json::<Cart>(store.as_ref(), keys::CART_ITEMS).unwrap_or_default();
        let shipping_address = session::read_json(store.as_ref(), keys::SHIPPING_ADDRESS);
        // The payment method is stored as a plain string, not JSON
        let payment_method = store
            .get(keys::PAYMENT_METHOD)
            .and_then(|raw| PaymentMethod::from_str(&raw).ok());

        Self {
            store,
            cart,
            shipping_address,
            payment_method,
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    #[must_use]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// If the product is already present the quantities merge, clamped to
    /// `min(existing + qty, count_in_stock)` so the stored quantity never
    /// exceeds stock. The clamp is a stock-safety policy, not an error, so
    /// nothing is surfaced. A first insert takes `qty` as given, without
    /// clamping (longstanding observed behavior; the product page bounds its
    /// quantity selector by stock).
    pub fn add_to_cart(&mut self, product: Product, qty: u32) -> &Cart {
        match self.cart.position(&product.id) {
            Some(index) => {
                if let Some(item) = self.cart.items.get_mut(index) {
                    let in_stock = item.product.count_in_stock;
                    let new_qty = item.qty.saturating_add(qty).min(in_stock);
                    *item = CartItem {
                        product,
                        qty: new_qty,
                    };
                }
            }
            None => self.cart.items.push(CartItem { product, qty }),
        }
        self.persist_cart();
        &self.cart
    }

    /// Replace the quantity of a cart entry.
    ///
    /// No-op if the product is not in the cart. The new quantity is taken
    /// unconditionally, NOT clamped to stock, asymmetric with
    /// [`Self::add_to_cart`]; the cart view drives this from a selector
    /// already bounded by stock.
    pub fn update_qty(&mut self, product_id: &ProductId, new_qty: u32) -> &Cart {
        if let Some(index) = self.cart.position(product_id) {
            if let Some(item) = self.cart.items.get_mut(index) {
                item.qty = new_qty;
            }
            self.persist_cart();
        }
        &self.cart
    }

    /// Remove a cart entry, preserving the order of the rest.
    ///
    /// No-op if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> &Cart {
        if let Some(index) = self.cart.position(product_id) {
            self.cart.items.remove(index);
            self.persist_cart();
        }
        &self.cart
    }

    /// Empty the cart and drop its persisted record.
    ///
    /// Shipping address and payment method survive; they are cleared on
    /// logout, not on order placement.
    pub fn clear(&mut self) {
        self.cart = Cart::new();
        self.store.remove(keys::CART_ITEMS);
    }

    // =========================================================================
    // Checkout Data
    // =========================================================================

    /// Store the shipping address for this checkout pass (overwritable).
    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        session::write_json(self.store.as_ref(), keys::SHIPPING_ADDRESS, &address);
        self.shipping_address = Some(address);
    }

    /// Store the selected payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.store.set(keys::PAYMENT_METHOD, method.as_str());
        self.payment_method = Some(method);
    }

    fn persist_cart(&self) {
        session::write_json(self.store.as_ref(), keys::CART_ITEMS, &self.cart);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::dec;

    use super::*;
    use crate::session::MemoryStore;

    fn product(id: &str, price: rust_decimal::Decimal, count_in_stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            slug: format!("{id}-slug"),
            name: format!("Product {id}"),
            category: "Test".to_string(),
            image: format!("/images/{id}.jpg"),
            price,
            brand: "Mango".to_string(),
            description: String::new(),
            num_reviews: 0,
            rating: 0.0,
            count_in_stock,
        }
    }

    fn manager() -> CartManager {
        CartManager::restore(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_new_product_takes_qty_as_given() {
        let mut cart = manager();
        // First insert is not clamped, mirroring the observed behavior
        cart.add_to_cart(product("p1", dec!(10), 3), 5);
        assert_eq!(cart.cart().find(&ProductId::new("p1")).unwrap().qty, 5);
    }

    #[test]
    fn test_add_merges_quantities() {
        let mut cart = manager();
        cart.add_to_cart(product("p1", dec!(10), 10), 2);
        cart.add_to_cart(product("p1", dec!(10), 10), 3);
        assert_eq!(cart.cart().len(), 1);
        assert_eq!(cart.cart().find(&ProductId::new("p1")).unwrap().qty, 5);
    }

    #[test]
    fn test_add_clamps_merge_to_stock() {
        // 9 in cart, stock 10, adding 5 clamps to 10, not 14
        let mut cart = manager();
        cart.add_to_cart(product("p1", dec!(10), 10), 9);
        cart.add_to_cart(product("p1", dec!(10), 10), 5);
        assert_eq!(cart.cart().find(&ProductId::new("p1")).unwrap().qty, 10);

        // Repeated adds never push past the stock limit
        cart.add_to_cart(product("p1", dec!(10), 10), 1);
        assert_eq!(cart.cart().find(&ProductId::new("p1")).unwrap().qty, 10);
    }

    #[test]
    fn test_update_qty_is_idempotent_and_unclamped() {
        let mut cart = manager();
        cart.add_to_cart(product("p1", dec!(10), 5), 1);

        cart.update_qty(&ProductId::new("p1"), 4);
        let once = cart.cart().clone();
        cart.update_qty(&ProductId::new("p1"), 4);
        assert_eq!(cart.cart(), &once);

        // No stock clamp on update (asymmetry with add, preserved)
        cart.update_qty(&ProductId::new("p1"), 9);
        assert_eq!(cart.cart().find(&ProductId::new("p1")).unwrap().qty, 9);
    }

    #[test]
    fn test_update_qty_unknown_product_is_noop() {
        let mut cart = manager();
        cart.add_to_cart(product("p1", dec!(10), 5), 1);
        cart.update_qty(&ProductId::new("ghost"), 7);
        assert_eq!(cart.cart().len(), 1);
        assert_eq!(cart.cart().find(&ProductId::new("p1")).unwrap().qty, 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = manager();
        cart.add_to_cart(product("p1", dec!(10), 5), 1);
        cart.add_to_cart(product("p2", dec!(20), 5), 1);
        cart.add_to_cart(product("p3", dec!(30), 5), 1);

        cart.remove_item(&ProductId::new("p2"));
        let ids: Vec<&str> = cart
            .cart()
            .items
            .iter()
            .map(|item| item.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        // Removing something absent changes nothing
        cart.remove_item(&ProductId::new("p2"));
        assert_eq!(cart.cart().len(), 2);
    }

    #[test]
    fn test_persist_restore_roundtrip() {
        let store: SharedStore = Arc::new(MemoryStore::new());

        let mut cart = CartManager::restore(Arc::clone(&store));
        cart.add_to_cart(product("p1", dec!(50), 10), 2);
        cart.add_to_cart(product("p2", dec!(30), 5), 1);
        cart.set_shipping_address(ShippingAddress {
            full_name: "Ada".to_string(),
            address: "1 Way".to_string(),
            city: "London".to_string(),
            postal_code: "E1".to_string(),
            country: "UK".to_string(),
        });
        cart.set_payment_method(PaymentMethod::PayPal);
        let before = cart.cart().clone();
        drop(cart);

        let restored = CartManager::restore(store);
        assert_eq!(restored.cart(), &before);
        assert_eq!(restored.shipping_address().unwrap().full_name, "Ada");
        assert_eq!(restored.payment_method(), Some(PaymentMethod::PayPal));
    }

    #[test]
    fn test_corrupt_cart_record_restores_empty() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.set(keys::CART_ITEMS, "{definitely not a cart");
        store.set(keys::PAYMENT_METHOD, "Barter");

        let restored = CartManager::restore(store);
        assert!(restored.cart().is_empty());
        assert_eq!(restored.payment_method(), None);
    }

    #[test]
    fn test_clear_drops_persisted_cart_but_keeps_checkout_data() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut cart = CartManager::restore(Arc::clone(&store));
        cart.add_to_cart(product("p1", dec!(10), 5), 1);
        cart.set_payment_method(PaymentMethod::Cash);

        cart.clear();
        assert!(cart.cart().is_empty());
        assert_eq!(store.get(keys::CART_ITEMS), None);
        assert_eq!(store.get(keys::PAYMENT_METHOD), Some("Cash".to_string()));
    }
}
