//! Request parameters and response envelopes for the directory API.

use comps_core::{BusinessCandidate, Coordinate};
use serde::Deserialize;

/// Default search radius: 10 miles.
pub const DEFAULT_RADIUS_METERS: u32 = 16_093;

/// Default result cap per search.
pub const DEFAULT_LIMIT: u32 = 50;

/// Parameters for a nearby-business search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub coordinate: Coordinate,
    pub radius_meters: u32,
    pub limit: u32,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            term: term.into(),
            coordinate,
            radius_meters: DEFAULT_RADIUS_METERS,
            limit: DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Where and how chain-size lookups search.
///
/// The directory's name search is fuzzy, so lookups are pinned to one metro
/// area and a category filter, then post-filtered to exact name matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSizeScope {
    /// Free-text location, e.g. `New York, NY`.
    pub location: String,
    pub radius_meters: u32,
    /// Comma-separated directory category aliases.
    pub categories: String,
    pub limit: u32,
}

impl Default for ChainSizeScope {
    fn default() -> Self {
        Self {
            location: "New York, NY".to_string(),
            radius_meters: 40_000,
            categories: "restaurants,food,bars".to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Envelope of `GET /businesses/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub businesses: Vec<BusinessCandidate>,
    #[serde(default)]
    pub total: u64,
}
