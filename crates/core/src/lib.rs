//! Mango Market Core - Shared types library.
//!
//! This crate provides common types used across all Mango Market components:
//! - `store` - Storefront client library (cart, checkout, auth, API client)
//! - `cli` - Command-line storefront frontend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! Everything here mirrors the shop backend's JSON wire format so the same
//! structs serve both persistence and transport.
//!
//! # Modules
//!
//! - [`types`] - IDs, money rounding, catalog, cart, checkout, and order types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
