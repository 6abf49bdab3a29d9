//! Order history and payment.

use clap::Subcommand;

use mango_market_core::{Order, OrderId};
use mango_market_store::Result;
use mango_market_store::api::OrderGateway;
use mango_market_store::checkout;

use crate::App;

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List my orders
    List,
    /// Show one order
    Show { id: String },
    /// Confirm payment for an order
    Pay { id: String },
}

pub async fn run(app: &App, command: OrdersCommand) -> Result<()> {
    match command {
        OrdersCommand::List => {
            let orders = app.client.my_orders().await?;
            if orders.is_empty() {
                println!("no orders yet");
            }
            for order in &orders {
                println!("{}", summary_line(order));
            }
        }
        OrdersCommand::Show { id } => {
            let order = app.client.my_order(&OrderId::from(id)).await?;
            print_order(&order);
        }
        OrdersCommand::Pay { id } => {
            // Surfacing the widget client id stands in for mounting the
            // payment button; the confirmation itself is one API call
            let client_id = app.client.paypal_client_id().await?;
            println!("payment widget client id: {client_id}");

            let order = checkout::mark_paid(&app.client, &OrderId::from(id)).await?;
            println!("order {} marked paid", order.id);
        }
    }
    Ok(())
}

fn summary_line(order: &Order) -> String {
    let placed = order
        .created_at
        .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string());
    let paid = if order.is_paid { "paid" } else { "unpaid" };
    let delivered = if order.is_delivered {
        "delivered"
    } else {
        "in transit"
    };
    format!(
        "{}  {placed}  ${}  {paid}, {delivered}",
        order.id, order.totals.total_price
    )
}

fn print_order(order: &Order) {
    println!("order {}", order.id);
    for item in &order.order_items {
        let price = format!("${}", item.price);
        println!("  {:<24} {:>3} x {}", item.name, item.qty, price);
    }
    println!("  ship to: {}, {}", order.shipping_address.city, order.shipping_address.country);
    println!("  method:  {}", order.payment_method);
    println!("  total:   ${}", order.totals.total_price);
    match order.paid_at {
        Some(at) => println!("  paid:    {}", at.format("%Y-%m-%d %H:%M")),
        None => println!("  paid:    not yet"),
    }
}
