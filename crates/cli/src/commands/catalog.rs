//! Catalog browsing.

use clap::Subcommand;

use mango_market_store::Result;
use mango_market_store::api::CatalogGateway;

use crate::App;

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List every product
    List,
    /// Show one product by slug
    Show { slug: String },
}

pub async fn run(app: &App, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List => {
            let products = app.client.products().await?;
            for product in &products {
                let price = format!("${}", product.price);
                println!(
                    "{:<24} {:>10}  {:>3} in stock  {}",
                    product.slug, price, product.count_in_stock, product.name
                );
            }
        }
        ProductsCommand::Show { slug } => {
            let product = app.client.product_by_slug(&slug).await?;
            println!("{} ({})", product.name, product.brand);
            println!("  id:       {}", product.id);
            println!("  category: {}", product.category);
            println!("  price:    ${}", product.price);
            println!(
                "  rating:   {:.1} ({} reviews)",
                product.rating, product.num_reviews
            );
            println!("  stock:    {}", product.count_in_stock);
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
        }
    }
    Ok(())
}
