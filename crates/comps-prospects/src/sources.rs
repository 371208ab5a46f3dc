//! Signal sources consumed by the pipeline, and their HTTP-backed impls.

use std::future::Future;

use comps_core::BusinessCandidate;
use comps_directory::{DirectoryClient, DirectoryError, SearchQuery};
use comps_news::NewsClient;

/// Candidate search and chain-size estimation.
pub trait BusinessDirectory: Sync {
    /// Businesses matching the query.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<BusinessCandidate>, DirectoryError>> + Send;

    /// Number of same-name locations for `brand`. Errors propagate.
    fn estimate_chain_size(
        &self,
        brand: &str,
    ) -> impl Future<Output = Result<u32, DirectoryError>> + Send;
}

/// Recent expansion coverage for a brand.
pub trait NewsActivity: Sync {
    /// Article count; implementations report failures as zero.
    fn count_expansion_articles(&self, brand: &str) -> impl Future<Output = u32> + Send;
}

impl BusinessDirectory for DirectoryClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BusinessCandidate>, DirectoryError> {
        DirectoryClient::search(self, query).await
    }

    async fn estimate_chain_size(&self, brand: &str) -> Result<u32, DirectoryError> {
        DirectoryClient::estimate_chain_size(self, brand).await
    }
}

impl NewsActivity for NewsClient {
    async fn count_expansion_articles(&self, brand: &str) -> u32 {
        NewsClient::count_expansion_articles(self, brand).await
    }
}
