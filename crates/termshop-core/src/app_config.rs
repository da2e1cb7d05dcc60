//! Application configuration resolved from the environment.

use std::path::PathBuf;

/// Runtime configuration for the storefront client.
///
/// Built by [`crate::load_app_config`]; every knob except the API base URL
/// has a default so a bare `TERMSHOP_API_BASE_URL=...` is enough to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the storefront REST API, e.g. `http://localhost:3000/api`.
    pub api_base_url: String,
    /// File holding the persisted session token; absence means logged out.
    pub token_path: PathBuf,
    /// Per-request timeout for API calls.
    pub request_timeout_secs: u64,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// `User-Agent` sent with every API request.
    pub user_agent: String,
}
