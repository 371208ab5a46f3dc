//! Prospect ranking orchestration.

use comps_core::{BusinessCandidate, Coordinate};
use comps_directory::SearchQuery;
use futures::stream::{self, StreamExt};

use crate::error::ProspectError;
use crate::scorer::expansion_score;
use crate::sources::{BusinessDirectory, NewsActivity};
use crate::types::{ProspectScore, ProspectSettings};

/// Ranks directory candidates by expansion score.
///
/// Holds no mutable state; one pipeline can serve any number of concurrent
/// [`ProspectPipeline::rank`] calls.
pub struct ProspectPipeline<D, N> {
    directory: D,
    news: N,
    settings: ProspectSettings,
}

impl<D, N> ProspectPipeline<D, N>
where
    D: BusinessDirectory,
    N: NewsActivity,
{
    pub fn new(directory: D, news: N) -> Self {
        Self::with_settings(directory, news, ProspectSettings::default())
    }

    pub fn with_settings(directory: D, news: N, settings: ProspectSettings) -> Self {
        Self {
            directory,
            news,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> ProspectSettings {
        self.settings
    }

    /// Run the full ranking for one category around one point.
    ///
    /// 1. Search the directory for candidates.
    /// 2. For each candidate, fetch chain size and news hits concurrently.
    /// 3. Drop candidates whose chain-size lookup failed.
    /// 4. Score survivors and sort by score, highest first.
    ///
    /// Candidates are enriched up to `max_concurrent_candidates` at a time.
    /// Equal scores keep the directory's order. Dropping the returned future
    /// cancels every in-flight request and discards partial results.
    ///
    /// # Errors
    ///
    /// Returns [`ProspectError::Directory`] if the candidate search fails.
    /// Per-candidate failures never fail the call.
    pub async fn rank(
        &self,
        category: &str,
        coordinate: Coordinate,
    ) -> Result<Vec<ProspectScore>, ProspectError> {
        let query = SearchQuery::new(category, coordinate)
            .with_radius(self.settings.radius_meters)
            .with_limit(self.settings.limit);

        let candidates = self.directory.search(&query).await?;

        let mut prospects: Vec<ProspectScore> = stream::iter(candidates)
            .map(|candidate| self.score_candidate(candidate))
            .buffered(self.settings.max_concurrent_candidates.max(1))
            .filter_map(std::future::ready)
            .collect()
            .await;

        // Stable: ties keep directory order.
        prospects.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(prospects)
    }

    /// Both signals or nothing.
    async fn score_candidate(&self, candidate: BusinessCandidate) -> Option<ProspectScore> {
        let (chain_count, news_hits) = tokio::join!(
            self.directory.estimate_chain_size(&candidate.name),
            self.news.count_expansion_articles(&candidate.name),
        );
        let chain_count = chain_count.ok()?;

        let score = expansion_score(
            chain_count,
            candidate.review_count,
            candidate.rating,
            news_hits,
        );

        Some(ProspectScore {
            name: candidate.name.clone(),
            score,
            chain_count,
            news_hits,
            candidate,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
