//! Order history command.

use termshop_api::ApiClient;
use termshop_engine::SessionStore;

use crate::render;

/// Prints the caller's order log, newest first as the backend returns it.
///
/// # Errors
///
/// Returns an error if the order list cannot be fetched.
pub(crate) async fn run_orders(api: &ApiClient, session: &SessionStore) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        println!("Please login to view orders.");
        return Ok(());
    }

    let orders = api.list_orders().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    render::orders(&orders);
    Ok(())
}
