//! Shared type definitions.
//!
//! Serde field names follow the backend JSON (camelCase, Mongo-style `_id`)
//! so these types round-trip unchanged through both the session store and
//! the wire.

mod cart;
mod checkout;
mod id;
mod order;
mod price;
mod product;
mod user;

pub use cart::{Cart, CartItem};
pub use checkout::{OrderDraft, OrderItem, OrderTotals, PaymentMethod, ShippingAddress};
pub use id::{OrderId, ProductId, UserId};
pub use order::Order;
pub use price::round2;
pub use product::Product;
pub use user::{AuthSession, Credentials, NewUser, ProfileUpdate, TokenCheck, User};
