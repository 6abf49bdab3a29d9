//! The checkout steps: shipping, payment, place.
//!
//! Every step re-runs the guard chain before doing anything; a redirect is
//! reported as guidance, not as an error, and the command exits cleanly.

use std::str::FromStr;

use clap::{Args, Subcommand};

use mango_market_core::{PaymentMethod, ShippingAddress};
use mango_market_store::checkout::{
    self, CheckoutState, CheckoutStep, GuardOutcome, RedirectTarget,
};
use mango_market_store::{Result, StoreError};

use crate::App;

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Store the shipping address
    Shipping(ShippingArgs),
    /// Select the payment method (PayPal, Stripe, or Cash)
    Payment { method: String },
    /// Submit the cart as an order
    Place,
}

#[derive(Args)]
pub struct ShippingArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    postal_code: String,
    #[arg(long)]
    country: String,
}

pub async fn run(app: &mut App, command: CheckoutCommand) -> Result<()> {
    let step = match command {
        CheckoutCommand::Shipping(_) => CheckoutStep::Shipping,
        CheckoutCommand::Payment { .. } => CheckoutStep::Payment,
        CheckoutCommand::Place => CheckoutStep::PlaceOrder,
    };

    let state = CheckoutState::of(&app.cart, app.auth.auth_status());
    if let GuardOutcome::Redirect(target) = checkout::guard::evaluate(step, &state) {
        println!("{}", describe(target));
        return Ok(());
    }

    match command {
        CheckoutCommand::Shipping(args) => {
            app.cart.set_shipping_address(ShippingAddress {
                full_name: args.full_name,
                address: args.address,
                city: args.city,
                postal_code: args.postal_code,
                country: args.country,
            });
            println!("shipping address saved; next: mm-cli checkout payment <method>");
        }
        CheckoutCommand::Payment { method } => {
            let method = PaymentMethod::from_str(&method)
                .map_err(|e| StoreError::Validation(e.to_string()))?;
            app.cart.set_payment_method(method);
            println!("paying with {method}; next: mm-cli checkout place");
        }
        CheckoutCommand::Place => {
            let order = checkout::place_order(&app.client, &mut app.cart).await?;
            println!("order {} placed", order.id);
            println!("  items:    ${}", order.totals.items_price);
            println!("  shipping: ${}", order.totals.shipping_price);
            println!("  tax:      ${}", order.totals.tax_price);
            println!("  total:    ${}", order.totals.total_price);
            println!("pay with: mm-cli orders pay {}", order.id);
        }
    }
    Ok(())
}

const fn step_command(step: CheckoutStep) -> &'static str {
    match step {
        CheckoutStep::Shipping => "shipping",
        CheckoutStep::Payment => "payment",
        CheckoutStep::PlaceOrder => "place",
    }
}

fn describe(target: RedirectTarget) -> String {
    match target {
        RedirectTarget::Login { redirect } => format!(
            "please sign in first (mm-cli account login), then return to `checkout {}`",
            step_command(redirect)
        ),
        RedirectTarget::Home => "the cart is empty; add something first (mm-cli cart add)".to_string(),
        RedirectTarget::Shipping => {
            "a shipping address is needed first (mm-cli checkout shipping)".to_string()
        }
        RedirectTarget::Payment => {
            "a payment method is needed first (mm-cli checkout payment)".to_string()
        }
    }
}
