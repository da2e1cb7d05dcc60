//! Client construction, request plumbing, and catalog endpoints.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use termshop_core::{AppConfig, Product};

use crate::error::ApiError;
use crate::token::TokenStore;
use crate::types::ProductList;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the storefront backend.
///
/// Cheap to clone; clones share the HTTP connection pool and the token
/// store. Every request attaches the stored bearer token when one exists.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    tokens: TokenStore,
}

impl ApiClient {
    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &AppConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            tokens,
        )
    }

    /// Builds a client against an explicit base URL. Used directly by tests
    /// pointed at a local mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse as an absolute URL or
    /// the HTTP client cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        tokens: TokenStore,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        // Normalize to a trailing slash so Url::join treats the last path
        // segment as a directory instead of replacing it.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|err| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// One page of catalog results.
    ///
    /// `q` and `tags` are attached only when present; the backend treats a
    /// missing parameter and an empty one differently.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected response shape.
    pub async fn list_products(
        &self,
        skip: u64,
        limit: u32,
        q: Option<&str>,
        tags: Option<&str>,
    ) -> Result<ProductList, ApiError> {
        let skip = skip.to_string();
        let limit = limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![("skip", &skip), ("limit", &limit)];
        if let Some(q) = q {
            params.push(("q", q));
        }
        if let Some(tags) = tags {
            params.push(("tags", tags));
        }

        let url = self.build_url("products", &params)?;
        self.get_json(url, "product list").await
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or any other client
    /// error.
    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        let url = self.build_url(&format!("products/{id}"), &[])?;
        self.get_json(url, "product").await
    }

    pub(crate) fn build_url(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot append \"{path}\": {err}"),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.current() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and maps non-success statuses to typed errors.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        tracing::trace!(%url, status = status.as_u16(), "API response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                url: url.to_string(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// GET `url` and decode the JSON body.
    ///
    /// The body is read as text first so a shape mismatch reports which
    /// payload failed instead of a bare serde message.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(self.http.get(url.clone()), &url).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Deserialize {
            context: context.to_owned(),
            source: err,
        })
    }

    /// POST `body` as JSON and decode the JSON response.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.post(url.clone()).json(body), &url)
            .await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| ApiError::Deserialize {
            context: context.to_owned(),
            source: err,
        })
    }

    /// POST `body` as JSON, ignoring the response body.
    pub(crate) async fn post_ignore_body<B: Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.http.post(url.clone()).json(body), &url)
            .await?;
        Ok(())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}
