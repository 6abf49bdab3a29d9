//! Cart inspection and mutation.

use clap::Subcommand;

use mango_market_core::ProductId;
use mango_market_store::Result;
use mango_market_store::api::CatalogGateway;
use mango_market_store::checkout::compute_totals;

use crate::App;

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with priced totals
    Show,
    /// Add a product (looked up by slug) to the cart
    Add {
        slug: String,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Replace the quantity of a cart line
    Update { product_id: String, qty: u32 },
    /// Remove a cart line
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

pub async fn run(app: &mut App, command: CartCommand) -> Result<()> {
    match command {
        CartCommand::Show => show(app),
        CartCommand::Add { slug, qty } => {
            let product = app.client.product_by_slug(&slug).await?;
            let name = product.name.clone();
            app.cart.add_to_cart(product, qty);
            println!("added {qty} x {name}");
            show(app);
        }
        CartCommand::Update { product_id, qty } => {
            app.cart.update_qty(&ProductId::from(product_id), qty);
            show(app);
        }
        CartCommand::Remove { product_id } => {
            app.cart.remove_item(&ProductId::from(product_id));
            show(app);
        }
        CartCommand::Clear => {
            app.cart.clear();
            println!("cart emptied");
        }
    }
    Ok(())
}

fn show(app: &App) {
    let cart = app.cart.cart();
    if cart.is_empty() {
        println!("the cart is empty");
        return;
    }

    for item in &cart.items {
        let price = format!("${}", item.product.price);
        println!(
            "{:<24} {:>3} x {:<9} [{}]",
            item.product.name, item.qty, price, item.product.id
        );
    }

    let totals = compute_totals(cart);
    println!();
    println!("  items:    ${}", totals.items_price);
    println!("  shipping: ${}", totals.shipping_price);
    println!("  tax:      ${}", totals.tax_price);
    println!("  total:    ${}", totals.total_price);
}
