//! Auth session manager.
//!
//! Tracks the logged-in user derived from the bearer token stored in the
//! session store, validated lazily against the backend. Gates the checkout
//! guard chain and the admin views.

use secrecy::SecretString;

use mango_market_core::{AuthSession, Credentials, NewUser, ProfileUpdate, User};

use crate::api::AuthGateway;
use crate::checkout::AuthStatus;
use crate::error::{Result, StoreError};
use crate::session::{SharedStore, keys};

/// The client's view of who is logged in.
pub struct AuthSessionManager<G> {
    gateway: G,
    store: SharedStore,
    session: Option<AuthSession>,
}

impl<G: AuthGateway> AuthSessionManager<G> {
    /// Create a manager with no validated session yet.
    ///
    /// Call [`Self::restore_session`] to pick up a previously stored token.
    #[must_use]
    pub const fn new(gateway: G, store: SharedStore) -> Self {
        Self {
            gateway,
            store,
            session: None,
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// Status as the checkout guard chain sees it: anything short of a
    /// validated session counts as not authenticated.
    #[must_use]
    pub const fn auth_status(&self) -> AuthStatus {
        if self.session.is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::NotAuthenticated
        }
    }

    /// Whether the current user may see the admin views.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin)
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Log in and persist the issued token.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure (bad credentials arrive as a remote
    /// `{message}`); nothing is stored on failure.
    pub async fn login(&mut self, email: &str, password: SecretString) -> Result<&AuthSession> {
        let credentials = Credentials {
            email: email.to_string(),
            password,
        };
        let session = self.gateway.login(&credentials).await?;
        Ok(self.install(session))
    }

    /// Register a new account and persist the issued token.
    ///
    /// # Errors
    ///
    /// `StoreError::Validation` if the two password fields differ;
    /// otherwise propagates the gateway failure.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: SecretString,
        confirm_password: &SecretString,
    ) -> Result<&AuthSession> {
        use secrecy::ExposeSecret;
        if password.expose_secret() != confirm_password.expose_secret() {
            return Err(StoreError::Validation("Passwords don't match".to_string()));
        }

        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password,
        };
        let session = self.gateway.register(&new_user).await?;
        Ok(self.install(session))
    }

    /// Update the profile of the logged-in user; the backend issues a fresh
    /// token which replaces the stored one.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure; the old session stays in place.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<&AuthSession> {
        let session = self.gateway.update_profile(update).await?;
        Ok(self.install(session))
    }

    /// Restore the session from a previously stored token, if any.
    ///
    /// The token is re-validated against the backend. An explicit
    /// `is_valid: false` removes it from storage; a validation call that
    /// could not complete (network, server error) leaves the session
    /// unauthenticated for now but keeps the token, so a transient outage
    /// does not log anyone out.
    pub async fn restore_session(&mut self) -> AuthStatus {
        let Some(token) = self.store.get(keys::USER_TOKEN) else {
            return AuthStatus::NotAuthenticated;
        };

        match self.gateway.validate_token(&token).await {
            Ok(check) if check.is_valid => {
                if let Some(user) = check.user {
                    self.session = Some(AuthSession { user, token });
                } else {
                    // A valid token without a user payload is a backend
                    // contract violation; treat it as unknown
                    tracing::warn!("token validation returned no user");
                    self.session = None;
                }
            }
            Ok(_) => {
                tracing::info!("stored token rejected, signing out");
                self.store.remove(keys::USER_TOKEN);
                self.session = None;
            }
            Err(e) => {
                // Currently unknown, not logged out
                tracing::warn!(error = %e, "token validation unavailable");
                self.session = None;
            }
        }

        self.auth_status()
    }

    /// Clear the token from storage and the in-memory session immediately.
    ///
    /// Cart clearing on logout is the presentation layer's job (the cart
    /// manager is a separate component).
    pub fn logout(&mut self) {
        self.store.remove(keys::USER_TOKEN);
        self.session = None;
    }

    fn install(&mut self, session: AuthSession) -> &AuthSession {
        self.store.set(keys::USER_TOKEN, &session.token);
        self.session.insert(session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use mango_market_core::{TokenCheck, UserId};

    use super::*;
    use crate::api::ApiError;
    use crate::session::{MemoryStore, SessionStore};

    /// Scripted validation outcomes; login/register always succeed.
    struct FakeAuthGateway {
        validate: fn() -> std::result::Result<TokenCheck, ApiError>,
    }

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            is_admin: false,
        }
    }

    impl AuthGateway for FakeAuthGateway {
        async fn login(
            &self,
            credentials: &Credentials,
        ) -> std::result::Result<AuthSession, ApiError> {
            Ok(AuthSession {
                user: User {
                    email: credentials.email.clone(),
                    ..user()
                },
                token: "issued-token".to_string(),
            })
        }

        async fn register(&self, _: &NewUser) -> std::result::Result<AuthSession, ApiError> {
            Ok(AuthSession {
                user: user(),
                token: "issued-token".to_string(),
            })
        }

        async fn validate_token(&self, _: &str) -> std::result::Result<TokenCheck, ApiError> {
            (self.validate)()
        }

        async fn update_profile(
            &self,
            _: &ProfileUpdate,
        ) -> std::result::Result<AuthSession, ApiError> {
            Ok(AuthSession {
                user: user(),
                token: "refreshed-token".to_string(),
            })
        }
    }

    fn manager(
        store: &Arc<MemoryStore>,
        validate: fn() -> std::result::Result<TokenCheck, ApiError>,
    ) -> AuthSessionManager<FakeAuthGateway> {
        let shared: SharedStore = Arc::<MemoryStore>::clone(store);
        AuthSessionManager::new(FakeAuthGateway { validate }, shared)
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let store = Arc::new(MemoryStore::new());
        let mut auth = manager(&store, || unreachable!());

        auth.login("ada@example.com", SecretString::from("pw"))
            .await
            .unwrap();
        assert_eq!(auth.auth_status(), AuthStatus::Authenticated);
        assert_eq!(store.get(keys::USER_TOKEN), Some("issued-token".to_string()));
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let store = Arc::new(MemoryStore::new());
        let mut auth = manager(&store, || unreachable!());

        let err = auth
            .register(
                "Ada",
                "ada@example.com",
                SecretString::from("pw1"),
                &SecretString::from("pw2"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.get(keys::USER_TOKEN), None);
    }

    #[tokio::test]
    async fn test_restore_without_token_is_signed_out() {
        let store = Arc::new(MemoryStore::new());
        let mut auth = manager(&store, || unreachable!());
        assert_eq!(auth.restore_session().await, AuthStatus::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_restore_valid_token_authenticates() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USER_TOKEN, "stored-token");
        let mut auth = manager(&store, || {
            Ok(TokenCheck {
                is_valid: true,
                user: Some(User {
                    id: UserId::new("u1"),
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                    is_admin: true,
                }),
            })
        });

        assert_eq!(auth.restore_session().await, AuthStatus::Authenticated);
        assert!(auth.is_admin());
        assert_eq!(store.get(keys::USER_TOKEN), Some("stored-token".to_string()));
    }

    #[tokio::test]
    async fn test_restore_explicitly_invalid_token_is_removed() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USER_TOKEN, "stale-token");
        let mut auth = manager(&store, || {
            Ok(TokenCheck {
                is_valid: false,
                user: None,
            })
        });

        assert_eq!(auth.restore_session().await, AuthStatus::NotAuthenticated);
        assert_eq!(store.get(keys::USER_TOKEN), None);
    }

    #[tokio::test]
    async fn test_restore_network_failure_keeps_token() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::USER_TOKEN, "maybe-fine-token");
        let mut auth = manager(&store, || {
            Err(ApiError::Remote {
                status: 503,
                message: "upstream down".to_string(),
            })
        });

        // Unknown, not logged out: unauthenticated now, token kept for later
        assert_eq!(auth.restore_session().await, AuthStatus::NotAuthenticated);
        assert_eq!(
            store.get(keys::USER_TOKEN),
            Some("maybe-fine-token".to_string())
        );
    }

    #[tokio::test]
    async fn test_logout_clears_token_immediately() {
        let store = Arc::new(MemoryStore::new());
        let mut auth = manager(&store, || unreachable!());
        auth.login("ada@example.com", SecretString::from("pw"))
            .await
            .unwrap();

        auth.logout();
        assert_eq!(auth.auth_status(), AuthStatus::NotAuthenticated);
        assert_eq!(store.get(keys::USER_TOKEN), None);
    }
}
