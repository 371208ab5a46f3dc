use comps_directory::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProspectError {
    /// The candidate search failed; there is nothing to score.
    #[error("directory search failed: {0}")]
    Directory(#[from] DirectoryError),
}
