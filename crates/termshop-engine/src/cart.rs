//! Cart reconciliation engine.
//!
//! Server state is authoritative. Every mutation awaits the backend and
//! then reloads the cart and address book, rebuilding totals from the fresh
//! lines; nothing is patched optimistically. A successful mutation is
//! therefore always followed by a view that matches what the backend
//! actually stored.

use std::sync::{Arc, Mutex};

use termshop_api::{ApiClient, ApiError};
use termshop_core::{Address, CartSnapshot, NewAddress};

use crate::error::CartError;
use crate::lock;
use crate::toast::{Severity, ToastQueue};

/// What a cart screen renders: the reconciled cart, the address book, and
/// the current shipping selection. `cart` is `None` until the first
/// successful load and after a load failure.
#[derive(Debug, Clone, Default)]
pub struct CartView {
    pub cart: Option<CartSnapshot>,
    pub addresses: Vec<Address>,
    pub selected_address: Option<i64>,
}

/// Shared cart engine handle. Cloning is cheap; all clones drive the same
/// state.
#[derive(Debug, Clone)]
pub struct CartEngine {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    toasts: ToastQueue,
    state: Mutex<CartView>,
}

impl CartEngine {
    #[must_use]
    pub fn new(api: ApiClient, toasts: ToastQueue) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                toasts,
                state: Mutex::new(CartView::default()),
            }),
        }
    }

    /// Reloads cart lines and the address book from the backend.
    ///
    /// Both fetches run concurrently and one failure discards both results:
    /// a half-loaded cart screen would let checkout run against a stale
    /// address book. On success the first saved address becomes the
    /// shipping selection.
    pub async fn load(&self) {
        let fetched = tokio::try_join!(self.inner.api.fetch_cart(), self.inner.api.list_addresses());
        match fetched {
            Ok((lines, addresses)) => {
                let mut state = lock(&self.inner.state);
                state.cart = Some(CartSnapshot::from_lines(lines));
                state.selected_address = addresses.first().map(|a| a.id);
                state.addresses = addresses;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load cart");
                {
                    let mut state = lock(&self.inner.state);
                    state.cart = None;
                    state.addresses.clear();
                    state.selected_address = None;
                }
                self.inner
                    .toasts
                    .post("Failed to load cart data", Severity::Error);
            }
        }
    }

    /// Adds a product to the server cart. The local view is not touched;
    /// the cart screen reloads on entry.
    pub async fn add_to_cart(&self, product_id: i64, quantity: u32) {
        let quantity = quantity.max(1);
        match self.inner.api.add_cart_line(product_id, quantity).await {
            Ok(()) => {
                self.inner
                    .toasts
                    .post("ITEM_ADDED_TO_CART", Severity::Success);
            }
            Err(err) => {
                tracing::warn!(error = %err, product_id, "failed to add to cart");
                self.inner
                    .toasts
                    .post(format!("FAILED_TO_ADD: {err}"), Severity::Error);
            }
        }
    }

    /// Sets a line's absolute quantity, floored at 1, then reloads.
    ///
    /// The floor means "decrement at quantity 1" degrades to a harmless
    /// re-set of the same quantity; dropping a line goes through
    /// [`CartEngine::remove_item`], never through quantity 0.
    pub async fn update_quantity(&self, line_id: i64, quantity: u32) {
        let quantity = quantity.max(1);
        match self.inner.api.update_cart_line(line_id, quantity).await {
            Ok(()) => {
                self.load().await;
                self.inner.toasts.post("Quantity updated", Severity::Success);
            }
            Err(err) => {
                tracing::warn!(error = %err, line_id, "failed to update quantity");
                self.inner
                    .toasts
                    .post("Failed to update quantity", Severity::Error);
            }
        }
    }

    /// Removes a line, then reloads.
    pub async fn remove_item(&self, line_id: i64) {
        match self.inner.api.remove_cart_line(line_id).await {
            Ok(()) => {
                self.load().await;
                self.inner.toasts.post("Item removed", Severity::Info);
            }
            Err(err) => {
                tracing::warn!(error = %err, line_id, "failed to remove item");
                self.inner
                    .toasts
                    .post("Failed to remove item", Severity::Error);
            }
        }
    }

    /// Validates and submits a new address.
    ///
    /// On success the stored record is appended to the address book and
    /// becomes the shipping selection, with no reload round-trip.
    ///
    /// # Errors
    ///
    /// [`CartError::MissingField`] if a required field is empty after
    /// trimming; [`CartError::Api`] if the backend rejects the create.
    pub async fn add_address(&self, address: NewAddress) -> Result<(), CartError> {
        let address = normalize_address(address)?;
        match self.inner.api.create_address(&address).await {
            Ok(created) => {
                {
                    let mut state = lock(&self.inner.state);
                    state.selected_address = Some(created.id);
                    state.addresses.push(created);
                }
                self.inner
                    .toasts
                    .post("Address added successfully", Severity::Success);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to add address");
                self.inner
                    .toasts
                    .post("Failed to add address", Severity::Error);
                Err(err.into())
            }
        }
    }

    /// Selects a known address for shipping. Unknown ids leave the
    /// selection unchanged and return `false`.
    pub fn select_address(&self, address_id: i64) -> bool {
        let mut state = lock(&self.inner.state);
        if state.addresses.iter().any(|a| a.id == address_id) {
            state.selected_address = Some(address_id);
            true
        } else {
            false
        }
    }

    /// Places an order shipping to the selected address.
    ///
    /// Two dependent backend calls: the selection is first stored as the
    /// account's default shipping address, then the order is created from
    /// the server-side cart. A failure between the calls leaves the new
    /// default in place with no order; the next checkout attempt simply
    /// overwrites it.
    ///
    /// # Errors
    ///
    /// [`CartError::NoAddressSelected`] when no address is selected;
    /// [`CartError::Api`] when either backend call fails.
    pub async fn checkout(&self) -> Result<(), CartError> {
        let selected = lock(&self.inner.state).selected_address;
        let Some(address_id) = selected else {
            self.inner
                .toasts
                .post("Please select a shipping address", Severity::Error);
            return Err(CartError::NoAddressSelected);
        };

        match self.place_order(address_id).await {
            Ok(()) => {
                lock(&self.inner.state).cart = None;
                self.inner
                    .toasts
                    .post("Order placed successfully!", Severity::Success);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, address_id, "checkout failed");
                self.inner
                    .toasts
                    .post("Failed to place order", Severity::Error);
                Err(err.into())
            }
        }
    }

    async fn place_order(&self, address_id: i64) -> Result<(), ApiError> {
        self.inner.api.set_default_address(address_id).await?;
        self.inner.api.create_order().await
    }

    /// A consistent copy of the current cart view.
    #[must_use]
    pub fn snapshot(&self) -> CartView {
        lock(&self.inner.state).clone()
    }
}

fn normalize_address(mut address: NewAddress) -> Result<NewAddress, CartError> {
    if address.line_one.trim().is_empty() {
        return Err(CartError::MissingField("lineOne"));
    }
    if address.city.trim().is_empty() {
        return Err(CartError::MissingField("city"));
    }
    if address.country.trim().is_empty() {
        return Err(CartError::MissingField("country"));
    }
    if address.pincode.trim().is_empty() {
        return Err(CartError::MissingField("pincode"));
    }
    // An empty optional line is omitted from the payload entirely.
    if address
        .line_two
        .as_deref()
        .is_some_and(|line| line.trim().is_empty())
    {
        address.line_two = None;
    }
    Ok(address)
}
