//! Wire-shape types for the storefront API.
//!
//! Observed response quirks, normalized here so callers see one canonical
//! shape:
//!
//! - Collection endpoints (`/cart`, `/users/address`, `/orders`) answer
//!   either a bare JSON array or a wrapper object with an `items` or `data`
//!   key, depending on backend version.
//! - `/auth/me` answers `{"user": {...}}` on current backends and the bare
//!   user object on older ones.

use serde::{Deserialize, Serialize};
use termshop_core::{Product, User};

/// `GET /products` envelope: the total match count across all pages plus the
/// rows for the requested window.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductList {
    pub count: u64,
    pub data: Vec<Product>,
}

/// A collection response in any of its observed encodings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Collection<T> {
    Bare(Vec<T>),
    Items { items: Vec<T> },
    Data { data: Vec<T> },
}

impl<T> Collection<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Collection::Bare(items)
            | Collection::Items { items }
            | Collection::Data { data: items } => items,
        }
    }
}

/// `/auth/me` payload in either of its observed encodings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserPayload {
    Wrapped { user: User },
    Bare(User),
}

impl UserPayload {
    pub(crate) fn into_user(self) -> User {
        match self {
            UserPayload::Wrapped { user } | UserPayload::Bare(user) => user,
        }
    }
}

/// Successful `/auth/login` and `/auth/signup` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartLine {
    pub(crate) product_id: i64,
    pub(crate) quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateCartLine {
    pub(crate) quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetDefaultAddress {
    pub(crate) default_shipping_address_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}
