//! Socrata client for the NYC Open Data property datasets.
//!
//! Each dataset lives at `resource/<id>.json` and is filtered with plain
//! column params or a SoQL `$where` clause. An app token is optional; without
//! one Socrata applies a shared, lower rate limit.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::bbl::Bbl;
use crate::error::ParcelError;
use crate::types::{DobViolation, DocumentParty, HpdContact, ParcelReport, PlutoLot, PropertyDocument};

const DEFAULT_BASE_URL: &str = "https://data.cityofnewyork.us/resource/";
const APP_TOKEN_HEADER: &str = "X-App-Token";

const PLUTO_DATASET: &str = "64uk-42ks.json";
const DOB_VIOLATIONS_DATASET: &str = "3h2n-5cm9.json";
const ACRIS_LEGALS_DATASET: &str = "8h5j-fqxa.json";
const ACRIS_PARTIES_DATASET: &str = "636b-3b5g.json";
const HPD_CONTACTS_DATASET: &str = "feu5-w2e2.json";

const VIOLATION_LIMIT: u32 = 200;
const DOCUMENT_LIMIT: u32 = 10;
const PARTY_LIMIT: u32 = 1000;
const CONTACT_LIMIT: u32 = 50;

pub struct OpenDataClient {
    client: Client,
    app_token: Option<String>,
    base_url: Url,
}

impl OpenDataClient {
    /// # Errors
    ///
    /// Returns [`ParcelError::Network`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        app_token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ParcelError> {
        Self::with_base_url(app_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ParcelError::Network`] if the `reqwest::Client` cannot be
    /// constructed, or [`ParcelError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        app_token: Option<&str>,
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
            app_token: app_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned),
            base_url: parsed,
        })
    }

    /// Fetches the PLUTO row for `bbl`, or `None` if the lot is not in PLUTO.
    ///
    /// # Errors
    ///
    /// Returns [`ParcelError`] on transport, status, or decode failure.
    pub async fn fetch_pluto_lot(&self, bbl: &Bbl) -> Result<Option<PlutoLot>, ParcelError> {
        let key = bbl.to_string();
        let rows: Vec<PlutoLot> = self
            .get_rows(PLUTO_DATASET, &[("bbl", &key), ("$limit", "1")], "pluto")
            .await?;
        Ok(rows.into_iter().next())
    }

    /// # Errors
    ///
    /// Returns [`ParcelError`] on transport, status, or decode failure.
    pub async fn fetch_dob_violations(&self, bbl: &Bbl) -> Result<Vec<DobViolation>, ParcelError> {
        let boro = bbl.borough.code().to_string();
        let block = bbl.padded_block();
        let lot = bbl.padded_lot();
        self.get_rows(
            DOB_VIOLATIONS_DATASET,
            &[
                ("boro", &boro),
                ("block", &block),
                ("lot", &lot),
                ("$limit", &VIOLATION_LIMIT.to_string()),
            ],
            "dob violations",
        )
        .await
    }

    /// Most recent ACRIS documents recorded against the lot, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ParcelError`] on transport, status, or decode failure.
    pub async fn fetch_property_documents(
        &self,
        bbl: &Bbl,
    ) -> Result<Vec<PropertyDocument>, ParcelError> {
        let filter = format!(
            "borough='{}' AND block='{}' AND lot='{}'",
            bbl.borough.code(),
            bbl.padded_block(),
            bbl.padded_lot()
        );
        self.get_rows(
            ACRIS_LEGALS_DATASET,
            &[
                ("$where", &filter),
                ("$order", "good_through_date DESC"),
                ("$limit", &DOCUMENT_LIMIT.to_string()),
            ],
            "acris documents",
        )
        .await
    }

    /// Parties on the given documents. An empty id list sends no request.
    ///
    /// # Errors
    ///
    /// Returns [`ParcelError`] on transport, status, or decode failure.
    pub async fn fetch_document_parties(
        &self,
        document_ids: &[String],
    ) -> Result<Vec<DocumentParty>, ParcelError> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = document_id_filter(document_ids);
        self.get_rows(
            ACRIS_PARTIES_DATASET,
            &[("$where", &filter), ("$limit", &PARTY_LIMIT.to_string())],
            "acris parties",
        )
        .await
    }

    /// HPD registration contacts for the lot.
    ///
    /// The dataset occasionally answers with an error object instead of an
    /// array; that is logged and treated as no contacts.
    ///
    /// # Errors
    ///
    /// Returns [`ParcelError`] on transport or status failure.
    pub async fn fetch_hpd_contacts(&self, bbl: &Bbl) -> Result<Vec<HpdContact>, ParcelError> {
        let key = bbl.to_string();
        let value: serde_json::Value = self
            .get_rows(
                HPD_CONTACTS_DATASET,
                &[("bbl", &key), ("$limit", &CONTACT_LIMIT.to_string())],
                "hpd contacts",
            )
            .await?;

        if !value.is_array() {
            tracing::warn!(bbl = %bbl, "hpd contacts response was not an array");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| ParcelError::Decode {
            context: "hpd contacts".to_string(),
            source: e,
        })
    }

    /// Collects every record on file for `bbl`.
    ///
    /// The four lot-keyed lookups run concurrently; parties are fetched once
    /// the document ids are known. Any failure aborts the report.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParcelError`] raised by any lookup.
    pub async fn parcel_report(&self, bbl: &Bbl) -> Result<ParcelReport, ParcelError> {
        let (lot, violations, documents, contacts) = tokio::try_join!(
            self.fetch_pluto_lot(bbl),
            self.fetch_dob_violations(bbl),
            self.fetch_property_documents(bbl),
            self.fetch_hpd_contacts(bbl),
        )?;

        let ids: Vec<String> = documents.iter().map(|d| d.document_id.clone()).collect();
        let parties = self.fetch_document_parties(&ids).await?;

        tracing::debug!(
            bbl = %bbl,
            violations = violations.len(),
            documents = documents.len(),
            parties = parties.len(),
            contacts = contacts.len(),
            "parcel report assembled"
        );

        Ok(ParcelReport {
            lot,
            violations,
            documents,
            parties,
            contacts,
        })
    }

    fn build_url(&self, dataset: &str, params: &[(&str, &str)]) -> Result<Url, ParcelError> {
        let mut url = self
            .base_url
            .join(dataset)
            .map_err(|e| ParcelError::InvalidBaseUrl {
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

    async fn get_rows<T: DeserializeOwned>(
        &self,
        dataset: &str,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<T, ParcelError> {
        let url = self.build_url(dataset, params)?;
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.app_token {
            request = request.header(APP_TOKEN_HEADER, token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "open data request rejected");
            return Err(ParcelError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ParcelError::Decode {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// SoQL `document_id in ('a','b')`, with single quotes doubled.
fn document_id_filter(ids: &[String]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("'{}'", id.replace('\'', "''")))
        .collect();
    format!("document_id in ({})", quoted.join(","))
}
