//! Interactive catalog browser.
//!
//! A line-oriented loop over the catalog engine: plain text is a search
//! (debounced by the engine, so rapid lines coalesce), `:`-prefixed lines
//! are commands that act immediately. The loop renders a fresh snapshot
//! after every settled action.

use std::io::Write as _;

use termshop_api::{ApiClient, ApiError};
use termshop_engine::{CartEngine, CatalogEngine, SessionStore, ToastQueue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cart::run_cart_add;
use crate::render;

/// Runs the browse loop until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error if the input or stdout fails.
pub(crate) async fn run_browse(
    catalog: &CatalogEngine,
    cart: &CartEngine,
    session: &SessionStore,
    toasts: &ToastQueue,
    api: &ApiClient,
    input: impl AsyncBufRead + Unpin,
) -> anyhow::Result<()> {
    let mut applied = catalog.subscribe();
    catalog.refresh().await;
    render::catalog(&catalog.snapshot());
    render::flush_toasts(toasts);
    println!();
    println!("type to search; :tag NAME, :clear, :page N, :show ID, :add ID [QTY], :quit");

    let mut lines = input.lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == ":quit" || line == ":q" {
            break;
        } else if line == ":clear" {
            catalog.clear_tags().await;
        } else if let Some(rest) = line.strip_prefix(":tag ") {
            catalog.toggle_tag(rest.trim()).await;
        } else if let Some(rest) = line.strip_prefix(":page ") {
            let Ok(page) = rest.trim().parse::<u32>() else {
                println!("usage: :page N");
                continue;
            };
            catalog.go_to_page(page).await;
        } else if let Some(rest) = line.strip_prefix(":show ") {
            match rest.trim().parse::<i64>() {
                Ok(id) => {
                    // A failed lookup should not end the session.
                    if let Err(err) = run_product(api, id).await {
                        tracing::warn!(product_id = id, error = %err, "product fetch failed");
                        println!("Could not load product {id}.");
                    }
                }
                Err(_) => println!("usage: :show ID"),
            }
            render::flush_toasts(toasts);
            continue;
        } else if let Some(rest) = line.strip_prefix(":add ") {
            match parse_add(rest) {
                Some((id, quantity)) => run_cart_add(cart, session, toasts, id, quantity).await?,
                None => println!("usage: :add ID [QTY]"),
            }
            continue;
        } else if line.starts_with(':') {
            println!("unknown command: {line}");
            continue;
        } else {
            // A search. Mark the watch as seen first so the wait below
            // cannot be satisfied by an older settle.
            applied.mark_unchanged();
            catalog.search(line);
            if applied.changed().await.is_err() {
                break;
            }
        }

        render::catalog(&catalog.snapshot());
        render::flush_toasts(toasts);
    }

    Ok(())
}

/// Fetches and prints one product.
///
/// # Errors
///
/// Returns an error on any API failure other than an unknown id.
pub(crate) async fn run_product(api: &ApiClient, id: i64) -> anyhow::Result<()> {
    match api.get_product(id).await {
        Ok(product) => render::product_detail(&product),
        Err(ApiError::NotFound { .. }) => println!("Product not found."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("termshop> ");
    std::io::stdout().flush()
}

fn parse_add(rest: &str) -> Option<(i64, u32)> {
    let mut parts = rest.split_whitespace();
    let id = parts.next()?.parse().ok()?;
    let quantity = match parts.next() {
        Some(raw) => raw.parse().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((id, quantity))
}
