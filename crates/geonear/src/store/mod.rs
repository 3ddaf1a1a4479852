//! The document-store collaborator contract.
//!
//! The search core does not own any storage. It talks to an external
//! collection through [`GeoQueryable`], which only has to support ordered,
//! inclusive range queries over one string field, addressed by a dotted
//! path into the stored document. Anything that can do that (an embedded
//! KV store, a remote document database, an in-memory map) can back a
//! proximity search.

pub use error::StoreError;
use error::Result;

use async_trait::async_trait;
use serde_json::Value;

/// A stored record as returned from a range query: a stable identifier
/// plus the document's field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// An externally indexed document collection supporting ordered prefix
/// range queries on a string field.
///
/// `range_query` must return every document whose value at `field_path`
/// is a string lexicographically within `[start, end]` (both inclusive,
/// plain byte-wise ordering), ascending by that value. The orchestrator
/// always passes `end = start-prefix + "~"`, which captures every
/// extension of the prefix because `"~"` sorts after all geohash symbols.
///
/// Implementations resolve `field_path` as a `.`-separated path into
/// nested structure, the way [`resolve_path`] does.
#[async_trait]
pub trait GeoQueryable: Send + Sync {
    async fn range_query(&self, field_path: &str, start: &str, end: &str)
    -> Result<Vec<Document>>;
}

/// Resolve a dotted path like `"venue.location"` into a nested value.
/// Returns `None` as soon as a segment is missing or the value at hand is
/// not an object.
#[must_use]
pub fn resolve_path<'a>(fields: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(fields, |value, segment| value.get(segment))
}

mod error {
    use thiserror::Error;

    /// Failure of the external document store. The orchestrator never
    /// retries these; one failed cell query fails the whole search.
    #[derive(Error, Debug)]
    pub enum StoreError {
        #[error("Backend error: {0}")]
        Backend(String),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }
    pub type Result<T> = std::result::Result<T, StoreError>;
}
