//! State engines for the storefront client.
//!
//! Each engine owns one screen's state behind a cheap-to-clone handle:
//! [`CatalogEngine`] for debounced search, tag filters, and pagination;
//! [`CartEngine`] for the reconcile-after-mutation cart; [`SessionStore`]
//! for auth; [`ToastQueue`] for transient notifications. Engines talk to
//! the backend through [`termshop_api::ApiClient`] and never render
//! anything; views pull immutable snapshots and draw those.
//!
//! Locking discipline: engine state lives behind plain [`std::sync::Mutex`]
//! guards that are never held across an await. Requests are sent with the
//! lock released and their results re-validated (the catalog's sequence
//! check) before being applied.

mod cart;
mod catalog;
mod debounce;
mod error;
mod session;
mod toast;

pub use cart::{CartEngine, CartView};
pub use catalog::{CatalogEngine, CatalogView, QueryState, DEBOUNCE_WINDOW, PAGE_SIZE};
pub use error::{AuthError, CartError};
pub use session::SessionStore;
pub use toast::{Severity, Toast, ToastId, ToastQueue, TOAST_TTL};

/// Locks a mutex, recovering the guard if a panicking holder poisoned it.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
