//! NYC GeoClient address lookup.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::bbl::{Bbl, Borough};
use crate::error::ParcelError;

const DEFAULT_BASE_URL: &str = "https://api.nyc.gov/geo/geoclient/";
const ADDRESS_PATH: &str = "v1/address.json";
const SUBSCRIPTION_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A geocoded address resolved to its tax lot.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoAddress {
    pub bbl: Bbl,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AddressEnvelope {
    address: Option<AddressFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressFields {
    bbl: Option<String>,
    bbl_borough_code: Option<String>,
    bbl_tax_block: Option<String>,
    bbl_tax_lot: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl AddressFields {
    /// Prefers the combined `bbl` field and falls back to the separate parts.
    fn bbl(&self) -> Option<Bbl> {
        if let Some(bbl) = self.bbl.as_deref().and_then(|s| s.parse().ok()) {
            return Some(bbl);
        }
        match (&self.bbl_borough_code, &self.bbl_tax_block, &self.bbl_tax_lot) {
            (Some(boro), Some(block), Some(lot)) => Bbl::from_parts(boro, block, lot).ok(),
            _ => None,
        }
    }
}

pub struct GeoClient {
    client: Client,
    subscription_key: String,
    base_url: Url,
}

impl GeoClient {
    /// # Errors
    ///
    /// Returns [`ParcelError::Network`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        subscription_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ParcelError> {
        Self::with_base_url(subscription_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ParcelError::Network`] if the `reqwest::Client` cannot be
    /// constructed, or [`ParcelError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        subscription_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ParcelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ParcelError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            subscription_key: subscription_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Resolves a house number and street in `borough` to its tax lot.
    ///
    /// # Errors
    ///
    /// - [`ParcelError::AddressNotFound`] if GeoClient returns no usable BBL.
    /// - [`ParcelError::Network`], [`ParcelError::Upstream`], or
    ///   [`ParcelError::Decode`] on request failure.
    pub async fn locate(
        &self,
        house_number: &str,
        street: &str,
        borough: Borough,
    ) -> Result<GeoAddress, ParcelError> {
        let house_number = house_number.trim();
        let street = street.trim();
        let not_found = || ParcelError::AddressNotFound {
            house: house_number.to_owned(),
            street: street.to_owned(),
            borough: borough.to_string(),
        };
        if house_number.is_empty() || street.is_empty() {
            return Err(not_found());
        }

        let mut url = self
            .base_url
            .join(ADDRESS_PATH)
            .map_err(|e| ParcelError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("houseNumber", house_number)
            .append_pair("street", street)
            .append_pair("borough", borough.geoclient_name());

        let response = self
            .client
            .get(url.clone())
            .header(SUBSCRIPTION_HEADER, &self.subscription_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "geoclient request rejected");
            return Err(ParcelError::Upstream {
                status: status.as_u16(),
                url: url.path().to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: AddressEnvelope =
            serde_json::from_str(&body).map_err(|e| ParcelError::Decode {
                context: format!("geoclient address({house_number} {street})"),
                source: e,
            })?;

        let fields = envelope.address.ok_or_else(not_found)?;
        let bbl = fields.bbl().ok_or_else(not_found)?;

        tracing::debug!(%bbl, house_number, street, "address resolved");
        Ok(GeoAddress {
            bbl,
            latitude: fields.latitude,
            longitude: fields.longitude,
        })
    }
}
