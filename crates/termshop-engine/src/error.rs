use termshop_api::ApiError;
use thiserror::Error;

/// Errors surfaced by cart operations that a caller must handle directly
/// (form validation, checkout refusal). Failures the cart absorbs into a
/// toast-and-keep-going flow never reach this type.
#[derive(Debug, Error)]
pub enum CartError {
    /// A required address field was empty after trimming.
    #[error("missing required address field: {0}")]
    MissingField(&'static str),

    /// Checkout was attempted with no shipping address selected.
    #[error("no shipping address selected")]
    NoAddressSelected,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors surfaced by login and signup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session token could not be persisted to disk.
    #[error("failed to persist session token: {0}")]
    Storage(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}
