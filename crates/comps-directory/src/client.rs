//! HTTP client for the business directory's `businesses/search` endpoint.
//!
//! Wraps `reqwest` with bearer-token auth, typed response decoding, and a
//! strict split between transport, status, and schema failures. Nothing is
//! retried; callers decide how a failure is tolerated.

use std::time::Duration;

use comps_core::BusinessCandidate;
use reqwest::{Client, Url};

use crate::error::DirectoryError;
use crate::types::{ChainSizeScope, SearchQuery, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3/";
const SEARCH_PATH: &str = "businesses/search";

/// Client for the business directory API.
///
/// Use [`DirectoryClient::new`] for production or
/// [`DirectoryClient::with_base_url`] to point at a mock server in tests.
pub struct DirectoryClient {
    client: Client,
    api_key: String,
    base_url: Url,
    chain_scope: ChainSizeScope,
}

impl DirectoryClient {
    /// Creates a new client pointed at the production directory API.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, DirectoryError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Network`] if the `reqwest::Client` cannot be
    /// constructed, or [`DirectoryError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash keeps `Url::join` from replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| DirectoryError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            chain_scope: ChainSizeScope::default(),
        })
    }

    /// Replaces the metro scope used by [`DirectoryClient::estimate_chain_size`].
    #[must_use]
    pub fn with_chain_scope(mut self, scope: ChainSizeScope) -> Self {
        self.chain_scope = scope;
        self
    }

    #[must_use]
    pub fn chain_scope(&self) -> &ChainSizeScope {
        &self.chain_scope
    }

    /// Searches for businesses matching `query.term` within
    /// `query.radius_meters` of `query.coordinate`.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::InvalidQuery`] if the term is blank (no request is sent).
    /// - [`DirectoryError::Network`] on transport failure or timeout.
    /// - [`DirectoryError::Upstream`] on a non-2xx status.
    /// - [`DirectoryError::Decode`] if the body does not match the schema.
    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<BusinessCandidate>, DirectoryError> {
        let term = query.term.trim();
        if term.is_empty() {
            return Err(DirectoryError::InvalidQuery(
                "search term must be non-empty".to_string(),
            ));
        }

        let url = self.build_url(&[
            ("term", term),
            ("latitude", &query.coordinate.latitude.to_string()),
            ("longitude", &query.coordinate.longitude.to_string()),
            ("radius", &query.radius_meters.to_string()),
            ("limit", &query.limit.to_string()),
        ])?;

        let response = self
            .request_json(&url, &format!("search(term={term})"))
            .await?;

        tracing::debug!(
            term,
            coordinate = %query.coordinate,
            returned = response.businesses.len(),
            total = response.total,
            "directory search complete"
        );

        Ok(response.businesses)
    }

    /// Estimates how many locations `brand` has inside the configured metro
    /// area.
    ///
    /// Sends a quoted exact-name query and counts only results whose name
    /// equals `brand` ignoring case (see [`count_exact_name_matches`]). The
    /// count is capped by the scope's result limit.
    ///
    /// # Errors
    ///
    /// Same as [`DirectoryError`] for [`DirectoryClient::search`]; upstream
    /// failures are propagated rather than reported as zero.
    pub async fn estimate_chain_size(&self, brand: &str) -> Result<u32, DirectoryError> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(DirectoryError::InvalidQuery(
                "brand name must be non-empty".to_string(),
            ));
        }

        let scope = &self.chain_scope;
        let quoted = format!("\"{brand}\"");
        let url = self.build_url(&[
            ("term", &quoted),
            ("location", &scope.location),
            ("radius", &scope.radius_meters.to_string()),
            ("limit", &scope.limit.to_string()),
            ("categories", &scope.categories),
        ])?;

        let response = match self
            .request_json(&url, &format!("chain size(brand={brand})"))
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(brand, error = %e, "chain-size lookup failed");
                return Err(e);
            }
        };

        let count = count_exact_name_matches(&response.businesses, brand);
        tracing::debug!(
            brand,
            returned = response.businesses.len(),
            exact_matches = count,
            "chain-size lookup complete"
        );
        Ok(count)
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn build_url(&self, params: &[(&str, &str)]) -> Result<Url, DirectoryError> {
        let mut url =
            self.base_url
                .join(SEARCH_PATH)
                .map_err(|e| DirectoryError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET, asserts a 2xx status, and decodes the
    /// search envelope.
    async fn request_json(&self, url: &Url, context: &str) -> Result<SearchResponse, DirectoryError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "directory request rejected");
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DirectoryError::Decode {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Counts businesses whose name equals `brand`, ignoring case and
/// surrounding whitespace. Substring matches do not count.
#[must_use]
pub fn count_exact_name_matches(businesses: &[BusinessCandidate], brand: &str) -> u32 {
    let wanted = brand.trim().to_lowercase();
    let count = businesses
        .iter()
        .filter(|b| b.name.trim().to_lowercase() == wanted)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
