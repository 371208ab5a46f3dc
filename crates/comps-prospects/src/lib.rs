//! Prospect ranking for commercial leasing.
//!
//! Searches a business directory for candidates in a category near a
//! coordinate, enriches each with a chain-size estimate and a recent
//! expansion-news count, and ranks them by a weighted expansion score.

pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;

pub use error::ProspectError;
pub use pipeline::ProspectPipeline;
pub use scorer::expansion_score;
pub use sources::{BusinessDirectory, NewsActivity};
pub use types::{ProspectScore, ProspectSettings};
