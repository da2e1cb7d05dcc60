//! Cart lines, derived cart totals, and shipping addresses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The product subset embedded in a cart line. Distinct from
/// [`crate::Product`]: the cart endpoint only carries what the cart view
/// needs, and the line itself has its own identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: i64,
    pub name: String,
    /// Unit price; string and numeric wire encodings both decode.
    pub price: Decimal,
}

/// One entry in the cart: a product reference plus a quantity.
///
/// `id` identifies the cart entry, not the product. Quantity is at least 1
/// for any line the server returns; reaching 0 means the line was removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: i64,
    pub quantity: u32,
    pub product: CartProduct,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// A reconciled view of the cart with totals derived from the lines.
///
/// Totals are computed by [`CartSnapshot::from_lines`] on every rebuild and
/// never patched incrementally, so they cannot drift from the line list they
/// were derived from.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total_price: Decimal,
    pub total_quantity: u32,
}

impl CartSnapshot {
    /// Builds a snapshot from normalized cart lines, deriving both totals.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let total_price = lines.iter().map(CartLine::line_total).sum();
        let total_quantity = lines.iter().map(|l| l.quantity).sum();
        Self {
            lines,
            total_price,
            total_quantity,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A saved shipping address. Created via the address form; never edited or
/// deleted through this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub line_one: String,
    #[serde(default)]
    pub line_two: Option<String>,
    pub city: String,
    pub country: String,
    pub pincode: String,
}

/// Payload for creating a new address; the server assigns the id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub line_one: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_two: Option<String>,
    pub city: String,
    pub country: String,
    pub pincode: String,
}
