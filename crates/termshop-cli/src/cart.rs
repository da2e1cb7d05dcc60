//! Cart and checkout command handlers.
//!
//! Every handler reloads through the cart engine before acting, so a
//! command always works against the server's current cart rather than
//! anything remembered from a previous invocation.

use clap::Subcommand;
use termshop_core::NewAddress;
use termshop_engine::{CartEngine, CartError, SessionStore, Severity, ToastQueue};

use crate::render;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart with totals and saved addresses
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i64,
        /// Units to add
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Increase a cart line's quantity by one
    Inc {
        /// Cart line id (see `cart show`)
        line_id: i64,
    },
    /// Decrease a cart line's quantity by one (never below 1)
    Dec {
        /// Cart line id (see `cart show`)
        line_id: i64,
    },
    /// Remove a line from the cart
    Remove {
        /// Cart line id (see `cart show`)
        line_id: i64,
    },
    /// Save a new shipping address and select it
    AddAddress {
        #[arg(long)]
        line_one: String,
        #[arg(long)]
        line_two: Option<String>,
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        pincode: String,
    },
    /// Place an order shipping to the selected address
    Checkout {
        /// Ship to this saved address instead of the first one
        #[arg(long)]
        address_id: Option<i64>,
    },
}

/// Dispatches one `cart` subcommand.
///
/// # Errors
///
/// Returns an error if stdout fails; API failures surface as toasts.
pub(crate) async fn run_cart(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    command: CartCommands,
) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => run_cart_show(cart, session, toasts).await,
        CartCommands::Add {
            product_id,
            quantity,
        } => run_cart_add(cart, session, toasts, product_id, quantity).await,
        CartCommands::Inc { line_id } => run_cart_bump(cart, session, toasts, line_id, 1).await,
        CartCommands::Dec { line_id } => run_cart_bump(cart, session, toasts, line_id, -1).await,
        CartCommands::Remove { line_id } => run_cart_remove(cart, session, toasts, line_id).await,
        CartCommands::AddAddress {
            line_one,
            line_two,
            city,
            country,
            pincode,
        } => {
            let address = NewAddress {
                line_one,
                line_two,
                city,
                country,
                pincode,
            };
            run_cart_add_address(cart, session, toasts, address).await
        }
        CartCommands::Checkout { address_id } => {
            run_cart_checkout(cart, session, toasts, address_id).await
        }
    }
}

async fn run_cart_show(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        println!("Please login to view cart.");
        return Ok(());
    }
    cart.load().await;
    render::cart(&cart.snapshot());
    render::flush_toasts(toasts);
    Ok(())
}

pub(crate) async fn run_cart_add(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    product_id: i64,
    quantity: u32,
) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        toasts.post("PLEASE LOGIN FIRST", Severity::Error);
        render::flush_toasts(toasts);
        return Ok(());
    }
    cart.add_to_cart(product_id, quantity).await;
    render::flush_toasts(toasts);
    Ok(())
}

async fn run_cart_bump(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    line_id: i64,
    delta: i64,
) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        println!("Please login to view cart.");
        return Ok(());
    }
    cart.load().await;
    let Some(line) = cart
        .snapshot()
        .cart
        .and_then(|c| c.lines.into_iter().find(|l| l.id == line_id))
    else {
        println!("no cart line {line_id}; run `cart show`");
        render::flush_toasts(toasts);
        return Ok(());
    };

    let requested = if delta > 0 {
        line.quantity.saturating_add(1)
    } else {
        // Decrement floors at 1 here and again in the engine; dropping a
        // line is only ever `cart remove`.
        line.quantity.saturating_sub(1).max(1)
    };
    cart.update_quantity(line_id, requested).await;

    render::cart(&cart.snapshot());
    render::flush_toasts(toasts);
    Ok(())
}

async fn run_cart_remove(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    line_id: i64,
) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        println!("Please login to view cart.");
        return Ok(());
    }
    cart.load().await;
    cart.remove_item(line_id).await;
    render::cart(&cart.snapshot());
    render::flush_toasts(toasts);
    Ok(())
}

async fn run_cart_add_address(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    address: NewAddress,
) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        println!("Please login to view cart.");
        return Ok(());
    }
    cart.load().await;
    match cart.add_address(address).await {
        Ok(()) | Err(CartError::Api(_) | CartError::NoAddressSelected) => {}
        Err(err @ CartError::MissingField(_)) => println!("{err}"),
    }
    render::cart(&cart.snapshot());
    render::flush_toasts(toasts);
    Ok(())
}

async fn run_cart_checkout(
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    address_id: Option<i64>,
) -> anyhow::Result<()> {
    if session.current_user().is_none() {
        println!("Please login to view cart.");
        return Ok(());
    }
    cart.load().await;

    let view = cart.snapshot();
    if view.cart.as_ref().is_none_or(|c| c.is_empty()) {
        println!("Your cart is empty.");
        render::flush_toasts(toasts);
        return Ok(());
    }

    if let Some(id) = address_id {
        if !cart.select_address(id) {
            println!("no saved address with id {id}; run `cart show`");
            render::flush_toasts(toasts);
            return Ok(());
        }
    }

    if cart.checkout().await.is_ok() {
        println!("Order placed. Run `termshop orders` to see it.");
    }
    render::flush_toasts(toasts);
    Ok(())
}
