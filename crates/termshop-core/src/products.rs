//! Catalog product type and tag derivations.
//!
//! ## Observed wire shape
//!
//! The storefront API serves `price` as either a JSON string (`"9.99"`) or a
//! bare number (`9.99`) depending on which backend revision answers.
//! `rust_decimal`'s deserializer accepts both, so the coercion happens at
//! decode time and everything downstream works with exact [`Decimal`] values.
//!
//! `tags` is a single denormalized comma-delimited string (`"citrus, zero
//! sugar,new"`). It is kept verbatim on the product and decomposed on demand
//! by [`split_tags`]; the filter menu is built per result page by
//! [`tag_vocabulary`].

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as returned by `GET /products` and `GET /products/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price. String and numeric wire encodings both decode here.
    pub price: Decimal,
    /// Raw comma-delimited tag string, exactly as served.
    #[serde(default)]
    pub tags: String,
}

impl Product {
    /// Returns this product's tags as trimmed, non-empty tokens.
    #[must_use]
    pub fn tag_tokens(&self) -> Vec<String> {
        split_tags(&self.tags)
    }
}

/// Splits a comma-delimited tag string into trimmed, non-empty tokens.
///
/// `"citrus, zero sugar,,new "` becomes `["citrus", "zero sugar", "new"]`.
#[must_use]
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Derives the tag filter vocabulary from a set of products: the union of
/// every product's tag tokens, deduplicated and sorted lexicographically.
///
/// The vocabulary is recomputed from whichever products are currently in
/// view, so it only ever offers tags present on the current result page.
/// The API has no global facet endpoint, so page scope is the boundary.
#[must_use]
pub fn tag_vocabulary(products: &[Product]) -> Vec<String> {
    let unique: BTreeSet<String> = products
        .iter()
        .flat_map(|p| split_tags(&p.tags))
        .collect();
    unique.into_iter().collect()
}
