//! Mango Market storefront client library.
//!
//! The client side of the shop: it talks to the backend REST API for
//! catalog, auth, and orders, and owns all client-local state - the
//! persisted cart, the checkout data, and the auth session.
//!
//! # Architecture
//!
//! - [`session`] - durable key/value store surviving restarts (cookie-jar
//!   analog); everything else persists through it
//! - [`cart`] - the cart manager: synchronous mutations, write-through
//! - [`checkout`] - guard chain, pricing engine, and order submission
//! - [`services`] - auth session manager, admin dashboard, refresh guard
//! - [`api`] - reqwest client for the backend plus the gateway traits that
//!   let tests substitute fakes
//!
//! State is injected, never ambient: components receive the session store
//! (and, for network work, a gateway) as constructor arguments so isolated
//! fakes can stand in during tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod services;
pub mod session;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
