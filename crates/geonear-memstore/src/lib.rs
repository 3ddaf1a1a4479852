//! In-memory reference store for the geonear proximity search library.
//!
//! [`MemoryGeoStore`] is the smallest honest implementation of the
//! [`GeoQueryable`] contract: documents live in a map, and a range query
//! scans them, keeps those whose addressed field falls inside the
//! requested lexicographic range, and returns them ascending by that
//! field. It exists to back integration tests and examples, and doubles
//! as a readable reference for wiring a real document store.
//!
//! # Examples
//!
//! ```rust
//! use geonear::{GeoPoint, GeoQuery, GeoSearcher};
//! use geonear_memstore::MemoryGeoStore;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryGeoStore::new();
//! store.insert_geo("tower", "position", 51.5081, -0.0759, json!({ "name": "Tower of London" }))?;
//! store.insert_geo("louvre", "position", 48.8606, 2.3376, json!({ "name": "Louvre" }))?;
//!
//! let searcher = GeoSearcher::new(store);
//! let center = GeoPoint::new(51.5074, -0.1278)?;
//! let nearby = searcher
//!     .search(&GeoQuery::new(center, 10.0, "position"))
//!     .await?;
//!
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(nearby[0].id, "tower");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use geonear::{Document, GeoData, GeoQueryable, StoreError, resolve_path};
use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::debug;

pub use error::{MemstoreError, Result};
mod error;

/// An in-memory document collection with ordered range queries.
///
/// Documents are arbitrary JSON objects keyed by id. The map sits behind
/// an `RwLock` so the store can serve the orchestrator's concurrent cell
/// queries through `&self`.
#[derive(Debug, Default)]
pub struct MemoryGeoStore {
    documents: RwLock<BTreeMap<String, Value>>,
}

impl MemoryGeoStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document with the given raw field map.
    pub fn insert(&self, id: impl Into<String>, fields: Value) {
        self.write_lock().insert(id.into(), fields);
    }

    /// Insert or replace a document carrying geo data under `field_path`,
    /// merged with `extra` fields (a JSON object, or null for none).
    ///
    /// The geo data is derived with [`GeoData::new`], so the stored hash
    /// always matches the stored point. A top-level `extra` key that
    /// collides with the first path segment is overwritten.
    pub fn insert_geo(
        &self,
        id: impl Into<String>,
        field_path: &str,
        latitude: f64,
        longitude: f64,
        extra: Value,
    ) -> Result<()> {
        let mut fields = match extra {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(MemstoreError::NonObjectFields),
        };

        let geo = GeoData::new(latitude, longitude)?;
        let mut nested = serde_json::to_value(&geo)?;
        for segment in field_path.rsplit('.') {
            let mut object = Map::new();
            object.insert(segment.to_string(), nested);
            nested = Value::Object(object);
        }
        if let Value::Object(object) = nested {
            for (key, value) in object {
                fields.insert(key, value);
            }
        }

        self.write_lock().insert(id.into(), Value::Object(fields));
        Ok(())
    }

    /// Remove a document, returning whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.write_lock().remove(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Value>> {
        self.documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Value>> {
        self.documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl GeoQueryable for MemoryGeoStore {
    async fn range_query(
        &self,
        field_path: &str,
        start: &str,
        end: &str,
    ) -> std::result::Result<Vec<Document>, StoreError> {
        let documents = self.read_lock();
        let hits: Vec<Document> = documents
            .iter()
            .filter_map(|(id, fields)| {
                let value = resolve_path(fields, field_path)?.as_str()?;
                ((start..=end).contains(&value))
                    .then(|| (value.to_string(), Document::new(id.clone(), fields.clone())))
            })
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, document)| document)
            .collect();

        debug!(field_path, start, end, hits = hits.len(), "Range scan");
        Ok(hits)
    }
}
