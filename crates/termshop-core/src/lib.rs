//! Core domain model and configuration for the termshop storefront client.
//!
//! Everything in this crate is pure: API types as the storefront backend
//! serves them, the derivations the views need (cart totals, tag vocabulary,
//! page arithmetic), and the environment-driven [`AppConfig`]. Network and
//! state-machine concerns live in `termshop-api` and `termshop-engine`.

mod app_config;
mod cart;
mod config;
mod orders;
mod products;
mod users;

pub use app_config::AppConfig;
pub use cart::{Address, CartLine, CartProduct, CartSnapshot, NewAddress};
pub use config::{load_app_config, load_app_config_from_env};
pub use orders::{Order, OrderItem};
pub use products::{split_tags, tag_vocabulary, Product};
pub use users::{Role, User};

use thiserror::Error;

/// Errors raised while loading [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but its value does not parse.
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
