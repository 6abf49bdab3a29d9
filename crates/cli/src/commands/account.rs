//! Account management: sign in, register, profile.

use clap::Subcommand;
use secrecy::SecretString;

use mango_market_core::ProfileUpdate;
use mango_market_store::{Result, StoreError};

use crate::App;

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign out; also empties the cart
    Logout,
    /// Show who is signed in
    Whoami,
    /// Update name, email, or password
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

pub async fn run(app: &mut App, command: AccountCommand) -> Result<()> {
    match command {
        AccountCommand::Login { email, password } => {
            let session = app.auth.login(&email, SecretString::from(password)).await?;
            println!("signed in as {}", session.user.name);
        }
        AccountCommand::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let session = app
                .auth
                .register(
                    &name,
                    &email,
                    SecretString::from(password),
                    &SecretString::from(confirm_password),
                )
                .await?;
            println!("welcome, {}", session.user.name);
        }
        AccountCommand::Logout => {
            app.auth.logout();
            app.cart.clear();
            println!("signed out");
        }
        AccountCommand::Whoami => match app.auth.current_user() {
            Some(user) => {
                println!("{} <{}>", user.name, user.email);
                if user.is_admin {
                    println!("(admin)");
                }
            }
            None => println!("not signed in"),
        },
        AccountCommand::Update {
            name,
            email,
            password,
        } => {
            // Unchanged fields fall back to the current profile, which the
            // backend expects to receive in full
            let (current_name, current_email) = {
                let user = app
                    .auth
                    .current_user()
                    .ok_or_else(|| StoreError::Unauthorized("sign in first".to_string()))?;
                (user.name.clone(), user.email.clone())
            };
            let update = ProfileUpdate {
                name: name.unwrap_or(current_name),
                email: email.unwrap_or(current_email),
                password: password.map(SecretString::from),
            };
            let session = app.auth.update_profile(&update).await?;
            println!("profile updated for {}", session.user.name);
        }
    }
    Ok(())
}
