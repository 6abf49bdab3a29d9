//! Checkout pipeline: guard chain, pricing engine, order submission.
//!
//! The flow is `shipping -> payment -> placeorder`. Before a step renders,
//! [`guard::evaluate`] decides whether the shopper may be there; when the
//! final step confirms, [`order::place_order`] prices the cart with
//! [`pricing::compute_totals`] and hands the draft to the backend.

pub mod guard;
pub mod order;
pub mod pricing;

pub use guard::{AuthStatus, CheckoutState, CheckoutStep, GuardOutcome, RedirectTarget};
pub use order::{mark_paid, place_order};
pub use pricing::compute_totals;
