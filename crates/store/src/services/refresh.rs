//! Stale-response guard for overlapping refreshes.
//!
//! A view that refetches on every visit can have several requests in
//! flight at once; only the newest one may write its result back. Each
//! refresh draws a [`Ticket`] from the view's [`Generation`] counter, and a
//! response is applied only while its ticket is still the current one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic refresh counter for one piece of state.
#[derive(Debug, Default)]
pub struct Generation {
    current: AtomicU64,
}

/// A claim on one refresh pass. Deliberately not `Clone`: one refresh,
/// one ticket.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Start a new refresh, invalidating every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the latest refresh.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ticket_is_current() {
        let generation = Generation::new();
        let ticket = generation.begin();
        assert!(generation.is_current(&ticket));
    }

    #[test]
    fn test_newer_refresh_invalidates_older_ticket() {
        let generation = Generation::new();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(&first));
        assert!(generation.is_current(&second));
    }

    #[test]
    fn test_each_refresh_gets_a_distinct_ticket() {
        let generation = Generation::new();
        let a = generation.begin();
        let b = generation.begin();
        assert_ne!(a, b);
    }
}
