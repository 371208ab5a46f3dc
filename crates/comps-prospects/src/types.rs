use comps_core::BusinessCandidate;
use comps_directory::{DEFAULT_LIMIT, DEFAULT_RADIUS_METERS};
use serde::Serialize;

/// A scored candidate. Owns the directory record it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProspectScore {
    pub name: String,
    /// Expansion score in `[0.0, 9.0]`.
    pub score: f64,
    pub chain_count: u32,
    pub news_hits: u32,
    pub candidate: BusinessCandidate,
}

impl ProspectScore {
    /// Score rounded to two decimals, e.g. `"7.25"`.
    #[must_use]
    pub fn formatted_score(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// Tuning knobs for one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProspectSettings {
    pub radius_meters: u32,
    pub limit: u32,
    /// Candidates enriched at the same time. Values below 1 are treated as 1.
    pub max_concurrent_candidates: usize,
}

impl Default for ProspectSettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
            limit: DEFAULT_LIMIT,
            max_concurrent_candidates: 4,
        }
    }
}
