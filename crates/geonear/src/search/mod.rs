//! Radius search over a geo-indexed document collection.
//!
//! The orchestration here turns one circular query into nine lexicographic
//! range queries (a center cell and its eight neighbors), fans them out
//! concurrently, and distills the merged results down to deduplicated,
//! distance-filtered candidates sorted nearest-first.

pub use error::SearchError;
mod orchestration;

use error::Result;
pub use orchestration::{GeoQuery, SearchCandidate, radius_search_inner};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum SearchError {
        #[error("Geohash error: {0}")]
        Geohash(#[from] crate::geohash::GeohashError),
        #[error("Store error: {0}")]
        Store(#[from] crate::store::StoreError),
        #[error("Invalid query: {0}")]
        InvalidQuery(String),
        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }
    pub type Result<T> = std::result::Result<T, SearchError>;
}
