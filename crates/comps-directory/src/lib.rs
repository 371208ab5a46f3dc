//! Business-directory client.
//!
//! Searches a Yelp Fusion-style `businesses/search` endpoint for candidates
//! near a coordinate, and estimates a brand's chain size by counting exact
//! name matches inside a fixed metro area.

pub mod client;
pub mod error;
pub mod types;

pub use client::{count_exact_name_matches, DirectoryClient};
pub use error::DirectoryError;
pub use types::{ChainSizeScope, SearchQuery, DEFAULT_LIMIT, DEFAULT_RADIUS_METERS};
