//! `mm-cli` - the Mango Market storefront from a terminal.
//!
//! Thin presentation layer over `mango-market-store`: it wires the
//! file-backed session store, the API client, and the cart/auth managers
//! together, then dispatches one subcommand. All state between invocations
//! lives in the session file, so the cart and login survive across runs
//! exactly like a browser session would.
//!
//! # Usage
//!
//! ```bash
//! # Browse and fill the cart
//! mm-cli products list
//! mm-cli cart add classic-shirt --qty 2
//!
//! # Check out
//! mm-cli account login ada@example.com --password '...'
//! mm-cli checkout shipping --full-name "Ada Lovelace" --address "1 Way" \
//!     --city London --postal-code "E1 6AN" --country UK
//! mm-cli checkout payment PayPal
//! mm-cli checkout place
//! mm-cli orders pay <order-id>
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mango_market_store::StoreConfig;
use mango_market_store::api::ApiClient;
use mango_market_store::cart::CartManager;
use mango_market_store::services::AuthSessionManager;
use mango_market_store::session::{FileStore, SharedStore};

use commands::{account, admin, cart, catalog, checkout, orders, theme};

#[derive(Parser)]
#[command(name = "mm-cli", version, about = "Mango Market storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the product catalog
    #[command(subcommand)]
    Products(catalog::ProductsCommand),
    /// Inspect and edit the cart
    #[command(subcommand)]
    Cart(cart::CartCommand),
    /// Walk the checkout steps: shipping, payment, place
    #[command(subcommand)]
    Checkout(checkout::CheckoutCommand),
    /// Sign in, register, and manage the account
    #[command(subcommand)]
    Account(account::AccountCommand),
    /// Order history and payment
    #[command(subcommand)]
    Orders(orders::OrdersCommand),
    /// Shop-wide aggregates (admin accounts only)
    #[command(subcommand)]
    Admin(admin::AdminCommand),
    /// Show or set the dark-mode preference
    Theme(theme::ThemeArgs),
}

/// Everything a subcommand needs, built once per invocation.
struct App {
    client: ApiClient,
    cart: CartManager,
    auth: AuthSessionManager<ApiClient>,
    store: SharedStore,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mango_market_store=warn")),
        )
        // Keep stdout clean for command output
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> mango_market_store::Result<()> {
    let config = StoreConfig::from_env()?;
    let store: SharedStore = Arc::new(FileStore::open(&config.session_file));
    let client = ApiClient::new(&config, Arc::clone(&store));

    let mut auth = AuthSessionManager::new(client.clone(), Arc::clone(&store));
    auth.restore_session().await;
    let cart = CartManager::restore(Arc::clone(&store));

    let mut app = App {
        client,
        cart,
        auth,
        store,
    };

    match cli.command {
        Command::Products(command) => catalog::run(&app, command).await,
        Command::Cart(command) => cart::run(&mut app, command).await,
        Command::Checkout(command) => checkout::run(&mut app, command).await,
        Command::Account(command) => account::run(&mut app, command).await,
        Command::Orders(command) => orders::run(&app, command).await,
        Command::Admin(command) => admin::run(&app, command).await,
        Command::Theme(args) => theme::run(&app, &args),
    }
}
