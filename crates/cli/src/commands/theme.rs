//! Dark-mode preference, persisted in the session like everything else.

use clap::{Args, ValueEnum};

use mango_market_store::Result;
use mango_market_store::session::{SessionStore, keys};

use crate::App;

#[derive(Args)]
pub struct ThemeArgs {
    /// Omit to show the current preference
    #[arg(value_enum)]
    mode: Option<Mode>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Dark,
    Light,
}

pub fn run(app: &App, args: &ThemeArgs) -> Result<()> {
    match args.mode {
        Some(mode) => {
            let dark = matches!(mode, Mode::Dark);
            app.store.set(keys::DARK_MODE, if dark { "true" } else { "false" });
            println!("theme set to {}", if dark { "dark" } else { "light" });
        }
        None => {
            let dark = app
                .store
                .get(keys::DARK_MODE)
                .is_some_and(|raw| raw == "true");
            println!("theme: {}", if dark { "dark" } else { "light" });
        }
    }
    Ok(())
}
