//! Admin dashboard aggregates.
//!
//! Pulls the summary cards (sales total, order/product/user counts) and the
//! monthly sales chart through [`AdminGateway`]. Every card loads and fails
//! independently, so one broken aggregate endpoint does not blank the whole
//! dashboard. Each card carries its own [`Generation`] counter; a refresh
//! that was overtaken by a newer one has its result dropped instead of
//! overwriting fresher data.

use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::api::{AdminGateway, ApiError, SalesPoint};
use crate::services::refresh::Generation;

/// Lifecycle of one dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CardState<T> {
    #[default]
    Loading,
    Ready(T),
    /// The shopper-facing message from the failed fetch.
    Failed(String),
}

impl<T> CardState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }
}

/// Snapshot of every card, as the admin view renders it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub orders_count: CardState<u64>,
    pub orders_total: CardState<Decimal>,
    pub products_count: CardState<u64>,
    pub users_count: CardState<u64>,
    pub monthly_sales: CardState<Vec<SalesPoint>>,
}

#[derive(Default)]
struct Generations {
    orders_count: Generation,
    orders_total: Generation,
    products_count: Generation,
    users_count: Generation,
    monthly_sales: Generation,
}

/// Fetches and holds the admin dashboard state.
pub struct DashboardService<G> {
    gateway: G,
    cards: Mutex<Dashboard>,
    generations: Generations,
}

impl<G: AdminGateway> DashboardService<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cards: Mutex::new(Dashboard::default()),
            generations: Generations::default(),
        }
    }

    /// Current card states, cloned out so the caller holds no lock.
    #[must_use]
    pub fn snapshot(&self) -> Dashboard {
        self.with_cards(|cards| cards.clone())
    }

    /// Refresh every card concurrently.
    pub async fn refresh(&self) {
        tokio::join!(
            self.refresh_orders_count(),
            self.refresh_orders_total(),
            self.refresh_products_count(),
            self.refresh_users_count(),
            self.refresh_monthly_sales(),
        );
    }

    pub async fn refresh_orders_count(&self) {
        self.refresh_card(
            &self.generations.orders_count,
            self.gateway.orders_count(),
            |cards| &mut cards.orders_count,
        )
        .await;
    }

    pub async fn refresh_orders_total(&self) {
        self.refresh_card(
            &self.generations.orders_total,
            self.gateway.orders_total(),
            |cards| &mut cards.orders_total,
        )
        .await;
    }

    pub async fn refresh_products_count(&self) {
        self.refresh_card(
            &self.generations.products_count,
            self.gateway.products_count(),
            |cards| &mut cards.products_count,
        )
        .await;
    }

    pub async fn refresh_users_count(&self) {
        self.refresh_card(
            &self.generations.users_count,
            self.gateway.users_count(),
            |cards| &mut cards.users_count,
        )
        .await;
    }

    pub async fn refresh_monthly_sales(&self) {
        self.refresh_card(
            &self.generations.monthly_sales,
            self.gateway.monthly_sales(),
            |cards| &mut cards.monthly_sales,
        )
        .await;
    }

    /// Shared refresh discipline: draw a ticket, flip the card to
    /// `Loading`, fetch, and apply the result only if no newer refresh
    /// started in the meantime.
    async fn refresh_card<T>(
        &self,
        generation: &Generation,
        fetch: impl Future<Output = Result<T, ApiError>>,
        slot: impl Fn(&mut Dashboard) -> &mut CardState<T>,
    ) {
        let ticket = generation.begin();
        self.with_cards(|cards| *slot(cards) = CardState::Loading);

        let outcome = match fetch.await {
            Ok(value) => CardState::Ready(value),
            Err(e) => {
                tracing::warn!(error = %e, "dashboard card fetch failed");
                CardState::Failed(e.to_string())
            }
        };

        if generation.is_current(&ticket) {
            self.with_cards(|cards| *slot(cards) = outcome);
        } else {
            tracing::debug!("dropping overtaken dashboard refresh");
        }
    }

    fn with_cards<R>(&self, f: impl FnOnce(&mut Dashboard) -> R) -> R {
        let mut cards = self
            .cards
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut cards)
    }
}
