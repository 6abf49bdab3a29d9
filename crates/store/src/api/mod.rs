//! Backend API client and the gateway traits in front of it.
//!
//! The shop backend is an HTTP/JSON API. [`ApiClient`] is the real
//! implementation; the gateway traits ([`CatalogGateway`], [`AuthGateway`],
//! [`OrderGateway`], [`AdminGateway`]) are the seams the rest of the
//! library programs against, so tests can substitute fakes without a
//! network.
//!
//! Authenticated calls send `Authorization: Bearer <token>`; a non-2xx
//! response body carries `{ "message": ... }` and that message is what the
//! shopper sees.

mod client;

pub use client::ApiClient;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use mango_market_core::{
    AuthSession, Credentials, NewUser, Order, OrderDraft, OrderId, Product, ProfileUpdate,
    TokenCheck,
};

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No token available, or the backend rejected the one we sent.
    #[error("Unauthorized request")]
    Unauthorized,

    /// Non-2xx response; `message` comes from the response body.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not decode as the expected JSON.
    #[error("Failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog reads.
pub trait CatalogGateway {
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn product_by_slug(&self, slug: &str) -> impl Future<Output = Result<Product, ApiError>>;
}

/// Account and token operations.
pub trait AuthGateway {
    fn login(&self, credentials: &Credentials)
    -> impl Future<Output = Result<AuthSession, ApiError>>;
    fn register(&self, new_user: &NewUser) -> impl Future<Output = Result<AuthSession, ApiError>>;
    /// Validate a bearer token. A `Remote`/`Http` failure means the check
    /// could not run, which callers must treat differently from an explicit
    /// `is_valid: false`.
    fn validate_token(&self, token: &str) -> impl Future<Output = Result<TokenCheck, ApiError>>;
    fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<AuthSession, ApiError>>;
}

/// Order submission and history.
pub trait OrderGateway {
    fn submit_order(&self, draft: &OrderDraft) -> impl Future<Output = Result<Order, ApiError>>;
    fn my_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>>;
    fn my_order(&self, id: &OrderId) -> impl Future<Output = Result<Order, ApiError>>;
    fn pay_order(&self, id: &OrderId) -> impl Future<Output = Result<Order, ApiError>>;
}

/// Admin aggregate endpoints backing the dashboard.
pub trait AdminGateway {
    fn orders_count(&self) -> impl Future<Output = Result<u64, ApiError>>;
    fn orders_total(&self) -> impl Future<Output = Result<Decimal, ApiError>>;
    fn monthly_sales(&self) -> impl Future<Output = Result<Vec<SalesPoint>, ApiError>>;
    fn all_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>>;
    fn products_count(&self) -> impl Future<Output = Result<u64, ApiError>>;
    fn users_count(&self) -> impl Future<Output = Result<u64, ApiError>>;
}

/// One bar of the monthly sales chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesPoint {
    /// Month label (the backend groups by month id).
    #[serde(rename = "_id")]
    pub month: String,
    #[serde(rename = "totalSales")]
    pub total_sales: Decimal,
}
