//! Shared text rendering for the terminal views.
//!
//! Views draw engine snapshots and never mutate state. Toasts are drained
//! after each action so a message is printed exactly once, whichever view
//! triggered it.

use termshop_core::{Address, Order, Product};
use termshop_engine::{CartView, CatalogView, Severity, ToastQueue};

/// Prints and consumes every queued toast.
pub(crate) fn flush_toasts(toasts: &ToastQueue) {
    for toast in toasts.drain() {
        let label = match toast.severity {
            Severity::Info => "--",
            Severity::Success => "OK",
            Severity::Error => "!!",
        };
        println!("  [{label}] {}", toast.message);
    }
}

pub(crate) fn catalog(view: &CatalogView) {
    let query = &view.query;
    println!();
    println!(
        ":: CATALOG ::  {} item{}",
        query.total_count,
        plural(query.total_count)
    );
    if !query.search_term.is_empty() {
        println!("   search: \"{}\"", query.search_term);
    }
    if !query.active_tags.is_empty() {
        let active: Vec<&str> = query.active_tags.iter().map(String::as_str).collect();
        println!("   active: {}", active.join(", "));
    }

    if view.products.is_empty() {
        println!("   no products found");
    } else {
        println!("   {:>4}  {:<34} {:>9}  TAGS", "ID", "PRODUCT", "PRICE");
        for product in &view.products {
            let price = product.price.to_string();
            println!(
                "   {:>4}  {:<34} {:>9}  {}",
                product.id,
                truncate(&product.name, 34),
                price,
                product.tag_tokens().join(", ")
            );
        }
    }

    if !view.tag_menu.is_empty() {
        let menu: Vec<String> = view.tag_menu.iter().map(|t| format!("[{t}]")).collect();
        println!("   tags:   {}", menu.join(" "));
    }
    if query.total_pages() > 1 {
        println!("   page {}/{}", query.page, query.total_pages());
    }
}

pub(crate) fn product_detail(product: &Product) {
    println!();
    println!("#{}  {}", product.id, product.name);
    println!("   price: {}", product.price);
    let tags = product.tag_tokens();
    if !tags.is_empty() {
        println!("   tags:  {}", tags.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("   {}", product.description);
    }
}

pub(crate) fn cart(view: &CartView) {
    match &view.cart {
        None => println!("cart unavailable"),
        Some(cart) if cart.is_empty() => println!("Your cart is empty."),
        Some(cart) => {
            println!();
            println!(
                ":: CART ::  {} item{}",
                cart.total_quantity,
                plural(u64::from(cart.total_quantity))
            );
            println!("   {:>4}  {:>3}  {:<30} {:>8}  {:>9}", "LINE", "QTY", "PRODUCT", "UNIT", "TOTAL");
            for line in &cart.lines {
                let unit = line.product.price.to_string();
                let total = line.line_total().to_string();
                println!(
                    "   {:>4}  {:>3}  {:<30} {:>8}  {:>9}",
                    line.id,
                    line.quantity,
                    truncate(&line.product.name, 30),
                    unit,
                    total
                );
            }
            let grand_total = cart.total_price.to_string();
            println!("   {:>51}  {:>9}", "TOTAL", grand_total);
        }
    }

    if view.addresses.is_empty() {
        println!();
        println!("   no saved addresses yet");
    } else {
        println!();
        println!("   SHIPPING");
        for address in &view.addresses {
            let marker = if view.selected_address == Some(address.id) {
                "*"
            } else {
                " "
            };
            println!("   {marker} [{}] {}", address.id, format_address(address));
        }
    }
}

pub(crate) fn orders(orders: &[Order]) {
    println!();
    println!(
        ":: ORDER LOG ::  {} order{}",
        orders.len(),
        plural(u64::try_from(orders.len()).unwrap_or(u64::MAX))
    );
    for order in orders {
        let status = order.status.as_deref().unwrap_or("PLACED");
        println!();
        println!(
            "   #{}  {}  {}  total {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            status,
            order.net_amount
        );
        for item in &order.order_products {
            println!("      {} x {} @ {}", item.quantity, item.name, item.price);
        }
    }
}

fn format_address(address: &Address) -> String {
    let mut parts = vec![address.line_one.clone()];
    if let Some(line_two) = &address.line_two {
        parts.push(line_two.clone());
    }
    parts.push(address.city.clone());
    parts.push(format!("{} {}", address.country, address.pincode));
    parts.join(", ")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_owned()
    }
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
