//! Persisted session store.
//!
//! A cookie-jar analog: string keys to string values, durable across
//! restarts. The cart, checkout data, auth token, and theme preference all
//! live here so a new process resumes where the last one stopped.
//!
//! The store is intentionally synchronous - every cart mutation writes
//! through before it returns (there is no batching), and all mutation runs
//! to completion on one logical thread. The store is NOT synchronized
//! across processes; last writer wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Session keys for persisted client state.
pub mod keys {
    /// JSON array of cart items.
    pub const CART_ITEMS: &str = "CART_ITEMS";

    /// JSON shipping address object.
    pub const SHIPPING_ADDRESS: &str = "SHIPPING_ADDRESS";

    /// Payment method name (plain string).
    pub const PAYMENT_METHOD: &str = "PAYMENT_METHOD";

    /// Bearer token of the logged-in user.
    pub const USER_TOKEN: &str = "USER_TOKEN";

    /// Stringified boolean theme preference.
    pub const DARK_MODE: &str = "DARK_MODE";
}

/// Durable key/value persistence surviving restarts.
///
/// Object-safe so components can hold `Arc<dyn SessionStore>` and tests can
/// inject an isolated [`MemoryStore`].
pub trait SessionStore: Send + Sync {
    /// Read a raw value. `None` if the key was never set or was removed.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a raw value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Shared handle to a session store.
pub type SharedStore = Arc<dyn SessionStore>;

/// Read and decode a JSON value from the store.
///
/// A missing record or a decode failure both yield `None` - a corrupt
/// persisted record must never crash the client, it just means nothing was
/// stored (the failure is logged at debug level).
pub fn read_json<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "discarding undecodable session record");
            None
        }
    }
}

/// Encode and write a JSON value to the store.
pub fn write_json<T: Serialize>(store: &dyn SessionStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => tracing::error!(key, error = %e, "failed to encode session record"),
    }
}
