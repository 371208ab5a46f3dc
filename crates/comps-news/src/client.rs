//! HTTP client for a NewsAPI-style `everything` search endpoint.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::NewsError;
use crate::query::{expansion_query, search_window};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";
const EVERYTHING_PATH: &str = "everything";
const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Only the upstream total is needed; `articles` is capped per page and ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    total_results: u64,
}

pub struct NewsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    window_days: u32,
}

impl NewsClient {
    /// Creates a client for the production news API.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Network`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Network`] if the `reqwest::Client` cannot be built,
    /// or [`NewsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| NewsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            window_days: DEFAULT_WINDOW_DAYS,
        })
    }

    /// Overrides the trailing window (default 30 days).
    #[must_use]
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    /// Number of articles in the trailing window that match the brand's
    /// expansion query, as reported by the upstream total.
    ///
    /// Never fails: any error is logged and counted as zero hits.
    pub async fn count_expansion_articles(&self, brand: &str) -> u32 {
        self.count_expansion_articles_on(brand, Utc::now().date_naive())
            .await
    }

    /// [`NewsClient::count_expansion_articles`] with an explicit "today".
    pub async fn count_expansion_articles_on(&self, brand: &str, today: NaiveDate) -> u32 {
        match self.fetch_total_results(brand, today).await {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(brand, error = %e, "news lookup failed; counting zero hits");
                0
            }
        }
    }

    /// Fetches the upstream `totalResults` for the brand's expansion query.
    ///
    /// Totals above `u32::MAX` saturate.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Network`] on transport failure or timeout.
    /// - [`NewsError::Upstream`] on a non-2xx status.
    /// - [`NewsError::Decode`] if the body does not match the schema.
    pub async fn fetch_total_results(
        &self,
        brand: &str,
        today: NaiveDate,
    ) -> Result<u32, NewsError> {
        let url = self.build_url(brand, today)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                url = %redact_api_key(&url),
                "news request rejected"
            );
            return Err(NewsError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: EverythingResponse =
            serde_json::from_str(&body).map_err(|e| NewsError::Decode {
                context: format!("everything(brand={brand})"),
                source: e,
            })?;

        tracing::debug!(
            brand,
            total_results = parsed.total_results,
            "news lookup complete"
        );
        Ok(u32::try_from(parsed.total_results).unwrap_or(u32::MAX))
    }

    fn build_url(&self, brand: &str, today: NaiveDate) -> Result<Url, NewsError> {
        let window = search_window(today, self.window_days);
        let mut url =
            self.base_url
                .join(EVERYTHING_PATH)
                .map_err(|e| NewsError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("q", &expansion_query(brand))
            .append_pair("from", &window.from_param())
            .append_pair("to", &window.to_param())
            .append_pair("sortBy", "relevancy")
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

/// Returns `url` with the `apiKey` parameter removed, for logging.
fn redact_api_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "apiKey")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(kept);
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> NewsClient {
        NewsClient::with_base_url("secret-key", 30, "comps-test/0.1", "https://newsapi.org/v2")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_carries_query_window_and_key() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        let url = test_client().build_url("Sweetgreen", today).unwrap();
        assert_eq!(
            url.as_str(),
            "https://newsapi.org/v2/everything?q=Sweetgreen+OR+opens+OR+expands+OR+raises\
             &from=2025-03-09&to=2025-04-08&sortBy=relevancy&apiKey=secret-key"
        );
    }

    #[test]
    fn window_override_changes_from_date() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        let url = test_client()
            .with_window_days(7)
            .build_url("Sweetgreen", today)
            .unwrap();
        assert!(url.as_str().contains("from=2025-04-01"), "got {url}");
    }

    #[test]
    fn redact_strips_api_key_only() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        let url = test_client().build_url("Sweetgreen", today).unwrap();
        let redacted = redact_api_key(&url);
        assert!(!redacted.as_str().contains("secret-key"));
        assert!(redacted.as_str().contains("sortBy=relevancy"));
    }
}
