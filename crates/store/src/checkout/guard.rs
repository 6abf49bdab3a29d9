//! Checkout guard chain.
//!
//! An ordered precondition check run before each checkout step renders. The
//! evaluation is pure - it reads a snapshot of client state and returns
//! either `Allow` or the redirect target, leaving the act of navigating to
//! the presentation layer. A redirect is normal control flow, never an
//! error, and is not logged as a failure.
//!
//! The chain must be re-run on every navigation into a guarded step: cart,
//! address, payment, and token state can all change between visits, so
//! outcomes are never cached.

use std::fmt;

use crate::cart::CartManager;

/// The named steps of the checkout flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    PlaceOrder,
}

impl CheckoutStep {
    /// Route name as it appears in redirect parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::PlaceOrder => "placeorder",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the current session counts as authenticated.
///
/// Token validation may fail with a network or validation error; the guard
/// treats any such failure identically to "not authenticated" rather than
/// surfacing a fatal error, so the conversion happens before this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    /// No token, an invalid token, or a validation attempt that failed.
    NotAuthenticated,
}

/// Snapshot of the client state the guard chain inspects.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutState {
    pub auth: AuthStatus,
    pub cart_empty: bool,
    pub has_shipping_address: bool,
    pub has_payment_method: bool,
}

impl CheckoutState {
    /// Build a snapshot from the cart manager plus the auth status.
    #[must_use]
    pub fn of(cart: &CartManager, auth: AuthStatus) -> Self {
        Self {
            auth,
            cart_empty: cart.cart().is_empty(),
            has_shipping_address: cart.shipping_address().is_some(),
            has_payment_method: cart.payment_method().is_some(),
        }
    }
}

/// Where a failed precondition sends the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Login, carrying the step to return to once authenticated.
    Login { redirect: CheckoutStep },
    /// The home/catalog view (empty cart).
    Home,
    /// Collect a shipping address first.
    Shipping,
    /// Select a payment method first.
    Payment,
}

/// Result of evaluating the guard chain for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(RedirectTarget),
}

/// Evaluate the guard chain for a checkout step.
///
/// Preconditions in evaluation order; the first failure decides the
/// redirect:
///
/// 1. authenticated session - else login, with `redirect` set to the step
///    the shopper came from so login returns them there
/// 2. non-empty cart - else home
/// 3. for `payment` and `placeorder`: a stored shipping address - else the
///    shipping step
/// 4. for `placeorder`: a stored payment method - else the payment step
#[must_use]
pub fn evaluate(step: CheckoutStep, state: &CheckoutState) -> GuardOutcome {
    if state.auth == AuthStatus::NotAuthenticated {
        return GuardOutcome::Redirect(RedirectTarget::Login { redirect: step });
    }

    if state.cart_empty {
        return GuardOutcome::Redirect(RedirectTarget::Home);
    }

    if matches!(step, CheckoutStep::Payment | CheckoutStep::PlaceOrder)
        && !state.has_shipping_address
    {
        return GuardOutcome::Redirect(RedirectTarget::Shipping);
    }

    if step == CheckoutStep::PlaceOrder && !state.has_payment_method {
        return GuardOutcome::Redirect(RedirectTarget::Payment);
    }

    GuardOutcome::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(
        auth: AuthStatus,
        cart_empty: bool,
        has_shipping_address: bool,
        has_payment_method: bool,
    ) -> CheckoutState {
        CheckoutState {
            auth,
            cart_empty,
            has_shipping_address,
            has_payment_method,
        }
    }

    #[test]
    fn test_unauthenticated_redirects_to_login_with_current_step() {
        for step in [
            CheckoutStep::Shipping,
            CheckoutStep::Payment,
            CheckoutStep::PlaceOrder,
        ] {
            let outcome = evaluate(step, &state(AuthStatus::NotAuthenticated, false, true, true));
            assert_eq!(
                outcome,
                GuardOutcome::Redirect(RedirectTarget::Login { redirect: step })
            );
        }
    }

    #[test]
    fn test_empty_cart_redirects_home() {
        let outcome = evaluate(
            CheckoutStep::Shipping,
            &state(AuthStatus::Authenticated, true, true, true),
        );
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::Home));
    }

    #[test]
    fn test_payment_without_address_redirects_to_shipping() {
        // Scenario: visiting payment with no stored address bounces to
        // shipping; the login redirect parameter would still name payment
        let outcome = evaluate(
            CheckoutStep::Payment,
            &state(AuthStatus::Authenticated, false, false, false),
        );
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::Shipping));
    }

    #[test]
    fn test_placeorder_without_payment_redirects_to_payment() {
        let outcome = evaluate(
            CheckoutStep::PlaceOrder,
            &state(AuthStatus::Authenticated, false, true, false),
        );
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectTarget::Payment));
    }

    #[test]
    fn test_shipping_does_not_require_address_or_payment() {
        let outcome = evaluate(
            CheckoutStep::Shipping,
            &state(AuthStatus::Authenticated, false, false, false),
        );
        assert_eq!(outcome, GuardOutcome::Allow);
    }

    #[test]
    fn test_auth_precedes_cart_check() {
        // First failing precondition wins: auth is checked before the cart
        let outcome = evaluate(
            CheckoutStep::PlaceOrder,
            &state(AuthStatus::NotAuthenticated, true, false, false),
        );
        assert_eq!(
            outcome,
            GuardOutcome::Redirect(RedirectTarget::Login {
                redirect: CheckoutStep::PlaceOrder
            })
        );
    }

    #[test]
    fn test_fully_prepared_placeorder_is_allowed() {
        let outcome = evaluate(
            CheckoutStep::PlaceOrder,
            &state(AuthStatus::Authenticated, false, true, true),
        );
        assert_eq!(outcome, GuardOutcome::Allow);
    }
}
