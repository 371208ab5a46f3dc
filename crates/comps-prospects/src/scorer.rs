//! Weighted expansion score.
//!
//! Each signal is normalised against a saturation cap and weighted. The
//! weights sum to 0.90, so the best attainable score is 9.0.

const CHAIN_CAP: f64 = 10.0;
const REVIEW_CAP: f64 = 300.0;
const RATING_CAP: f64 = 5.0;
const NEWS_CAP: f64 = 5.0;

const CHAIN_WEIGHT: f64 = 0.40;
const REVIEW_WEIGHT: f64 = 0.20;
const RATING_WEIGHT: f64 = 0.15;
const NEWS_WEIGHT: f64 = 0.15;

const SCALE: f64 = 10.0;

/// Scores a prospect from its chain size, review volume, rating, and recent
/// expansion-news hits.
///
/// Inputs above their caps (10 locations, 300 reviews, 5.0 stars, 5 articles)
/// add nothing further. Ratings below zero or non-finite count as zero.
#[must_use]
pub fn expansion_score(chain_count: u32, review_count: u32, rating: f64, news_hits: u32) -> f64 {
    let chain = saturate(f64::from(chain_count), CHAIN_CAP) * CHAIN_WEIGHT;
    let reviews = saturate(f64::from(review_count), REVIEW_CAP) * REVIEW_WEIGHT;
    let rating = saturate(rating, RATING_CAP) * RATING_WEIGHT;
    let news = saturate(f64::from(news_hits), NEWS_CAP) * NEWS_WEIGHT;

    (chain + reviews + rating + news) * SCALE
}

/// `value / cap`, clamped to `[0.0, 1.0]`.
fn saturate(value: f64, cap: f64) -> f64 {
    if value.is_finite() {
        (value / cap).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
