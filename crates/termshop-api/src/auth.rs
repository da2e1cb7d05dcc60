//! Authentication endpoints.
//!
//! These return raw API results; deciding what a failure means for the
//! session (clearing the stored token, mapping 401 to bad credentials) is
//! the session layer's job.

use termshop_core::User;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthSession, Credentials, SignupRequest, UserPayload};

impl ApiClient {
    /// Exchanges credentials for a session token and user profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the backend rejects the
    /// credentials, or any other client error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let url = self.build_url("auth/login", &[])?;
        self.post_json(url, &Credentials { email, password }, "login session")
            .await
    }

    /// Registers an account and returns the fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected response shape.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let url = self.build_url("auth/signup", &[])?;
        self.post_json(
            url,
            &SignupRequest {
                name,
                email,
                password,
            },
            "signup session",
        )
        .await
    }

    /// The profile behind the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a missing or expired token, or
    /// any other client error.
    pub async fn me(&self) -> Result<User, ApiError> {
        let url = self.build_url("auth/me", &[])?;
        let payload: UserPayload = self.get_json(url, "current user").await?;
        Ok(payload.into_user())
    }
}
