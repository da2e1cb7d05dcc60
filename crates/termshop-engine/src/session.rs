//! Auth session store.
//!
//! Tracks the logged-in user and owns the stored credential's lifecycle:
//! login and signup persist the token before exposing the user, restore
//! validates a stored token against the backend, and logout is local-only.
//! The session store is the only writer to the [`TokenStore`]; the API
//! client just reads whatever token is current.

use std::sync::{Arc, Mutex};

use termshop_api::{ApiClient, ApiError, TokenStore};
use termshop_core::User;

use crate::error::AuthError;
use crate::lock;

/// Shared session handle. Cloning is cheap; all clones observe the same
/// session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    tokens: TokenStore,
    user: Mutex<Option<User>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: ApiClient, tokens: TokenStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                tokens,
                user: Mutex::new(None),
            }),
        }
    }

    /// Rehydrates the session from the stored token, if any.
    ///
    /// Without a stored token this returns immediately and the backend is
    /// never contacted. With one, the profile is fetched; any failure demotes
    /// to logged-out silently and discards the stored token, since the most
    /// likely cause is an expired session.
    pub async fn restore(&self) {
        if self.inner.tokens.current().is_none() {
            return;
        }
        match self.inner.api.me().await {
            Ok(user) => {
                *lock(&self.inner.user) = Some(user);
            }
            Err(err) => {
                tracing::warn!(error = %err, "session restore failed, clearing stored token");
                self.inner.tokens.clear();
                *lock(&self.inner.user) = None;
            }
        }
    }

    /// Logs in and persists the fresh session token.
    ///
    /// The token is written to disk before the user is exposed, so a
    /// logged-in session observed by anyone is always backed by a stored
    /// credential.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the backend rejects the pair,
    /// [`AuthError::Storage`] when the token cannot be persisted, or
    /// [`AuthError::Api`] for any other failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        match self.inner.api.login(email, password).await {
            Ok(session) => self.open_session(session),
            Err(ApiError::Unauthorized { .. }) => Err(AuthError::InvalidCredentials),
            Err(err) => Err(err.into()),
        }
    }

    /// Registers an account; a successful signup is immediately a live
    /// session, same as login.
    ///
    /// # Errors
    ///
    /// [`AuthError::Storage`] when the token cannot be persisted, or
    /// [`AuthError::Api`] when the backend rejects the registration.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let session = self.inner.api.signup(name, email, password).await?;
        self.open_session(session)
    }

    /// Ends the session locally: clears the stored token and the cached
    /// user. No backend call is made and this cannot fail.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        *lock(&self.inner.user) = None;
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        lock(&self.inner.user).clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        lock(&self.inner.user).is_some()
    }

    fn open_session(&self, session: termshop_api::AuthSession) -> Result<User, AuthError> {
        self.inner.tokens.save(&session.token)?;
        *lock(&self.inner.user) = Some(session.user.clone());
        Ok(session.user)
    }
}
