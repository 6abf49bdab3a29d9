//! Admin views: dashboard cards and the shop-wide order list.

use std::fmt::Display;

use clap::Subcommand;

use mango_market_store::api::AdminGateway;
use mango_market_store::services::{CardState, DashboardService};
use mango_market_store::{Result, StoreError};

use crate::App;

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Summary cards and monthly sales
    Dashboard,
    /// Every order in the shop
    Orders,
}

pub async fn run(app: &App, command: AdminCommand) -> Result<()> {
    if !app.auth.is_admin() {
        return Err(StoreError::Unauthorized("admin account required".to_string()));
    }

    match command {
        AdminCommand::Dashboard => {
            let service = DashboardService::new(app.client.clone());
            service.refresh().await;
            let dashboard = service.snapshot();

            println!("sales total:  {}", card(&dashboard.orders_total));
            println!("orders:       {}", card(&dashboard.orders_count));
            println!("products:     {}", card(&dashboard.products_count));
            println!("users:        {}", card(&dashboard.users_count));

            match &dashboard.monthly_sales {
                CardState::Ready(points) => {
                    println!("\nmonthly sales:");
                    for point in points {
                        println!("  {:<10} ${}", point.month, point.total_sales);
                    }
                }
                CardState::Failed(message) => println!("\nmonthly sales: unavailable ({message})"),
                CardState::Loading => {}
            }
        }
        AdminCommand::Orders => {
            let orders = app.client.all_orders().await?;
            for order in &orders {
                let paid = if order.is_paid { "paid" } else { "unpaid" };
                println!(
                    "{}  user {}  ${}  {paid}",
                    order.id, order.user, order.totals.total_price
                );
            }
            println!("{} orders", orders.len());
        }
    }
    Ok(())
}

fn card<T: Display>(state: &CardState<T>) -> String {
    match state {
        CardState::Loading => "...".to_string(),
        CardState::Ready(value) => value.to_string(),
        CardState::Failed(message) => format!("unavailable ({message})"),
    }
}
