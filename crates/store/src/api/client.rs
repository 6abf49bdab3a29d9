//! Backend API client implementation.
//!
//! Uses `reqwest` for HTTP and caches catalog reads with `moka`
//! (5-minute TTL). Cart, auth, and order calls are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use mango_market_core::{
    AuthSession, Credentials, NewUser, Order, OrderDraft, OrderId, Product, ProfileUpdate,
    TokenCheck,
};

use super::{AdminGateway, ApiError, AuthGateway, CatalogGateway, OrderGateway, SalesPoint};
use crate::config::StoreConfig;
use crate::session::{SessionStore, SharedStore, keys};

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Cached catalog values.
#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
}

/// Client for the shop backend API.
///
/// Cheaply cloneable via `Arc`. The session store is injected so the bearer
/// token always reflects the live session; an authenticated call with no
/// stored token fails with `ApiError::Unauthorized` before any I/O.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    api_url: Url,
    keys_url: Url,
    store: SharedStore,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &StoreConfig, store: SharedStore) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                api_url: config.api_url.clone(),
                keys_url: config.keys_url.clone(),
                store,
                cache,
            }),
        }
    }

    fn endpoint(&self, base: &Url, path: &str) -> String {
        format!("{}/{}", base.as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .client
            .request(method, self.endpoint(&self.inner.api_url, path))
    }

    /// Attach the stored bearer token, or fail before any I/O.
    fn authenticated(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let token = self
            .inner
            .store
            .get(keys::USER_TOKEN)
            .ok_or(ApiError::Unauthorized)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send a request and decode the JSON response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(remote_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Payment Widget Keys
    // =========================================================================

    /// Fetch the payment button's client identifier.
    ///
    /// The endpoint is bearer-guarded and answers with the id as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is stored or the request fails.
    #[instrument(skip(self))]
    pub async fn paypal_client_id(&self) -> Result<String, ApiError> {
        let token = self
            .inner
            .store
            .get(keys::USER_TOKEN)
            .ok_or(ApiError::Unauthorized)?;
        let response = self
            .inner
            .client
            .get(self.endpoint(&self.inner.keys_url, "api/keys/paypal"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(remote_error(status, &body));
        }
        Ok(body)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, slug: &str) {
        self.inner.cache.invalidate(&format!("product:{slug}")).await;
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Turn a non-2xx response into the error the shopper sees.
///
/// The backend sends `{ "message": ... }` bodies; 401/403 collapse to
/// `Unauthorized` so guard boundaries can redirect instead of reporting.
fn remote_error(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ApiError::Unauthorized;
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let message = serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| format!("HTTP {status}"),
        |parsed| parsed.message,
    );
    ApiError::Remote {
        status: status.as_u16(),
        message,
    }
}

// =============================================================================
// Gateway Implementations
// =============================================================================

impl CatalogGateway for ApiClient {
    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "products".to_string();
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product list");
            return Ok(products);
        }

        let products: Vec<Product> = self.send(self.request(Method::GET, "products")).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        let cache_key = format!("product:{slug}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .send(self.request(Method::GET, &format!("products/{slug}")))
            .await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }
}

impl AuthGateway for ApiClient {
    #[instrument(skip(self, credentials))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        self.send(self.request(Method::POST, "auth/login").json(credentials))
            .await
    }

    #[instrument(skip(self, new_user))]
    async fn register(&self, new_user: &NewUser) -> Result<AuthSession, ApiError> {
        self.send(self.request(Method::POST, "auth/register").json(new_user))
            .await
    }

    #[instrument(skip(self, token))]
    async fn validate_token(&self, token: &str) -> Result<TokenCheck, ApiError> {
        self.send(self.request(Method::GET, "auth").bearer_auth(token))
            .await
    }

    #[instrument(skip(self, update))]
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthSession, ApiError> {
        self.send(
            self.authenticated(Method::PUT, "auth/update")?
                .json(update),
        )
        .await
    }
}

impl OrderGateway for ApiClient {
    #[instrument(skip(self, draft))]
    async fn submit_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        self.send(self.authenticated(Method::POST, "orders")?.json(draft))
            .await
    }

    #[instrument(skip(self))]
    async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.send(self.authenticated(Method::GET, "orders")?).await
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn my_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.send(self.authenticated(Method::GET, &format!("orders/{id}"))?)
            .await
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn pay_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.send(self.authenticated(Method::PUT, &format!("orders/{id}/pay"))?)
            .await
    }
}

// Envelope shapes for the admin aggregate endpoints.
#[derive(Deserialize)]
struct CountEnvelope {
    count: u64,
}

#[derive(Deserialize)]
struct OrdersCount {
    orders: CountEnvelope,
}

#[derive(Deserialize)]
struct ProductsCount {
    products: CountEnvelope,
}

#[derive(Deserialize)]
struct UsersCount {
    users: CountEnvelope,
}

#[derive(Deserialize)]
struct OrdersTotal {
    orders: TotalEnvelope,
}

#[derive(Deserialize)]
struct TotalEnvelope {
    total: Decimal,
}

#[derive(Deserialize)]
struct OrdersSales {
    orders: SalesEnvelope,
}

#[derive(Deserialize)]
struct SalesEnvelope {
    #[serde(rename = "salesData")]
    sales_data: Vec<SalesPoint>,
}

impl AdminGateway for ApiClient {
    #[instrument(skip(self))]
    async fn orders_count(&self) -> Result<u64, ApiError> {
        let envelope: OrdersCount = self
            .send(self.authenticated(Method::GET, "orders/admin/count")?)
            .await?;
        Ok(envelope.orders.count)
    }

    #[instrument(skip(self))]
    async fn orders_total(&self) -> Result<Decimal, ApiError> {
        let envelope: OrdersTotal = self
            .send(self.authenticated(Method::GET, "orders/admin/total")?)
            .await?;
        Ok(envelope.orders.total)
    }

    #[instrument(skip(self))]
    async fn monthly_sales(&self) -> Result<Vec<SalesPoint>, ApiError> {
        let envelope: OrdersSales = self
            .send(self.authenticated(Method::GET, "orders/admin/sales")?)
            .await?;
        Ok(envelope.orders.sales_data)
    }

    #[instrument(skip(self))]
    async fn all_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.send(self.authenticated(Method::GET, "orders/admin/all")?)
            .await
    }

    #[instrument(skip(self))]
    async fn products_count(&self) -> Result<u64, ApiError> {
        let envelope: ProductsCount = self
            .send(self.authenticated(Method::GET, "products/admin/count")?)
            .await?;
        Ok(envelope.products.count)
    }

    #[instrument(skip(self))]
    async fn users_count(&self) -> Result<u64, ApiError> {
        let envelope: UsersCount = self
            .send(self.authenticated(Method::GET, "users/admin/count")?)
            .await?;
        Ok(envelope.users.count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::MemoryStore;

    fn client() -> ApiClient {
        let config = StoreConfig {
            api_url: Url::parse("https://shop.example.com/api").unwrap(),
            keys_url: Url::parse("https://shop.example.com").unwrap(),
            session_file: std::path::PathBuf::from("unused"),
        };
        ApiClient::new(&config, Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = client();
        assert_eq!(
            client.endpoint(&client.inner.api_url, "products"),
            "https://shop.example.com/api/products"
        );
        assert_eq!(
            client.endpoint(&client.inner.keys_url, "api/keys/paypal"),
            "https://shop.example.com/api/keys/paypal"
        );
    }

    #[test]
    fn test_authenticated_without_token_fails_before_io() {
        let client = client();
        let err = client.authenticated(Method::GET, "orders").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_remote_error_takes_message_from_body() {
        let err = remote_error(StatusCode::BAD_REQUEST, r#"{"message": "Out of stock"}"#);
        match err {
            ApiError::Remote { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Out of stock");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_remote_error_falls_back_to_status_line() {
        let err = remote_error(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        match err {
            ApiError::Remote { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "HTTP 502 Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized_status_collapses() {
        let err = remote_error(StatusCode::UNAUTHORIZED, r#"{"message": "bad token"}"#);
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_admin_envelopes_decode() {
        let counted: OrdersCount = serde_json::from_str(r#"{"orders": {"count": 7}}"#).unwrap();
        assert_eq!(counted.orders.count, 7);

        let sales: OrdersSales = serde_json::from_str(
            r#"{"orders": {"salesData": [{"_id": "2024-03", "totalSales": 1234.5}]}}"#,
        )
        .unwrap();
        assert_eq!(sales.orders.sales_data.first().unwrap().month, "2024-03");
    }
}
