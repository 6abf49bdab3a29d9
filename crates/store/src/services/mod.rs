//! Client-side services: auth session, admin dashboard, refresh guarding.

pub mod auth;
pub mod dashboard;
pub mod refresh;

pub use auth::AuthSessionManager;
pub use dashboard::{CardState, Dashboard, DashboardService};
pub use refresh::{Generation, Ticket};
