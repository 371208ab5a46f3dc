//! News-activity signal for prospect scoring.
//!
//! Counts recent articles that mention a brand alongside expansion keywords.
//! Unlike directory lookups, this signal never fails the caller: every
//! upstream problem is logged and reported as zero hits.

pub mod client;
pub mod error;
pub mod query;

pub use client::NewsClient;
pub use error::NewsError;
pub use query::{expansion_query, search_window, SearchWindow, EXPANSION_KEYWORDS};
