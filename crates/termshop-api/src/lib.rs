//! HTTP client for the storefront REST API.
//!
//! Wraps the backend's JSON endpoints (catalog, cart, addresses, orders,
//! auth) behind typed async methods. The client owns a [`TokenStore`] and
//! attaches the stored bearer credential to every request automatically, so
//! callers never handle raw authorization headers.
//!
//! The backend's response shapes vary between deployments in two known ways
//! (collections arrive bare or wrapped, `/auth/me` wraps the user or not);
//! normalization for both lives in the wire-type module so the rest of the
//! crate sees a single canonical shape.

mod auth;
mod cart;
mod client;
mod error;
mod token;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use token::TokenStore;
pub use types::{AuthSession, ProductList};
