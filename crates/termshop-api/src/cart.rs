//! Cart, address, and order endpoints.

use termshop_core::{Address, CartLine, NewAddress, Order};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AddCartLine, Collection, SetDefaultAddress, UpdateCartLine};

impl ApiClient {
    /// The caller's cart lines, in whatever encoding the backend uses.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected response shape.
    pub async fn fetch_cart(&self) -> Result<Vec<CartLine>, ApiError> {
        let url = self.build_url("cart", &[])?;
        let collection: Collection<CartLine> = self.get_json(url, "cart").await?;
        Ok(collection.into_items())
    }

    /// Adds `quantity` units of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] without a valid session, or any
    /// other client error.
    pub async fn add_cart_line(&self, product_id: i64, quantity: u32) -> Result<(), ApiError> {
        let url = self.build_url("cart", &[])?;
        self.post_ignore_body(
            url,
            &AddCartLine {
                product_id,
                quantity,
            },
        )
        .await
    }

    /// Sets the absolute quantity of an existing cart line.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn update_cart_line(&self, line_id: i64, quantity: u32) -> Result<(), ApiError> {
        let url = self.build_url(&format!("cart/{line_id}"), &[])?;
        self.send(
            self.http().patch(url.clone()).json(&UpdateCartLine { quantity }),
            &url,
        )
        .await?;
        Ok(())
    }

    /// Deletes a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn remove_cart_line(&self, line_id: i64) -> Result<(), ApiError> {
        let url = self.build_url(&format!("cart/{line_id}"), &[])?;
        self.send(self.http().delete(url.clone()), &url).await?;
        Ok(())
    }

    /// The caller's saved shipping addresses.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected response shape.
    pub async fn list_addresses(&self) -> Result<Vec<Address>, ApiError> {
        let url = self.build_url("users/address", &[])?;
        let collection: Collection<Address> = self.get_json(url, "address list").await?;
        Ok(collection.into_items())
    }

    /// Creates a shipping address and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected response shape.
    pub async fn create_address(&self, address: &NewAddress) -> Result<Address, ApiError> {
        let url = self.build_url("users/address", &[])?;
        self.post_json(url, address, "created address").await
    }

    /// Marks an address as the caller's default shipping address.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn set_default_address(&self, address_id: i64) -> Result<(), ApiError> {
        let url = self.build_url("users/update", &[])?;
        self.post_ignore_body(
            url,
            &SetDefaultAddress {
                default_shipping_address_id: address_id,
            },
        )
        .await
    }

    /// Places an order from the current cart and default shipping address.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn create_order(&self) -> Result<(), ApiError> {
        let url = self.build_url("orders", &[])?;
        self.send(self.http().post(url.clone()), &url).await?;
        Ok(())
    }

    /// The caller's past orders, newest first as returned by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected response shape.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.build_url("orders", &[])?;
        let collection: Collection<Order> = self.get_json(url, "order list").await?;
        Ok(collection.into_items())
    }
}
