//! Subcommand implementations. Each module owns its clap types and a
//! `run` function taking the shared [`crate::App`].

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod theme;
