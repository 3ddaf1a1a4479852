//! Core proximity search functionality.
//!
//! This module provides the main [`GeoSearcher`] interface for running
//! "near me" queries against a geo-indexed document collection. The
//! searcher owns a [`GeoQueryable`] store and a default [`SearchConfig`];
//! hashing, cell fan-out, and distance filtering all happen per call.
//!
//! # Quick Start
//!
//! ```rust
//! use geonear::{GeoPoint, GeoQuery, GeoSearcher};
//! # use geonear::{Document, GeoQueryable, StoreError};
//! # struct EmptyStore;
//! # #[async_trait::async_trait]
//! # impl GeoQueryable for EmptyStore {
//! #     async fn range_query(
//! #         &self,
//! #         _field_path: &str,
//! #         _start: &str,
//! #         _end: &str,
//! #     ) -> Result<Vec<Document>, StoreError> {
//! #         Ok(Vec::new())
//! #     }
//! # }
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), geonear::error::GeonearError> {
//! let searcher = GeoSearcher::new(EmptyStore);
//!
//! // Geo data to persist on a record write.
//! let geo = searcher.create_geo_data(51.5074, -0.1278)?;
//! assert_eq!(geo.geohash().len(), 9);
//!
//! // Everything within 5 km of central London.
//! let center = GeoPoint::new(51.5074, -0.1278)?;
//! let results = searcher
//!     .search(&GeoQuery::new(center, 5.0, "position"))
//!     .await?;
//! assert!(results.is_empty());
//! # Ok(())
//! # }
//! ```

use tracing::instrument;

use crate::{
    config::{SearchConfig, SearchConfigBuilder},
    error::GeonearError,
    geohash::GeoData,
    search::{GeoQuery, SearchCandidate, radius_search_inner},
    store::GeoQueryable,
};

/// The main proximity searcher over a geo-indexed document collection.
///
/// Generic over the store implementation; anything implementing
/// [`GeoQueryable`] works. The searcher is cheap to clone when the store
/// is, and holds no per-query state.
///
/// # Examples
///
/// With a custom default configuration:
/// ```rust
/// use geonear::{GeoSearcher, SearchConfigBuilder};
/// # use geonear::{Document, GeoQueryable, StoreError};
/// # struct EmptyStore;
/// # #[async_trait::async_trait]
/// # impl GeoQueryable for EmptyStore {
/// #     async fn range_query(
/// #         &self,
/// #         _field_path: &str,
/// #         _start: &str,
/// #         _end: &str,
/// #     ) -> Result<Vec<Document>, StoreError> {
/// #         Ok(Vec::new())
/// #     }
/// # }
///
/// let searcher = GeoSearcher::builder(EmptyStore)
///     .buffer_factor(1.02)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct GeoSearcher<S> {
    store: S,
    config: SearchConfig,
}

impl<S: GeoQueryable> GeoSearcher<S> {
    /// Create a searcher with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SearchConfig::default(),
        }
    }

    /// Create a searcher with a custom default configuration.
    pub fn with_config(store: S, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// Start building a searcher with a customized configuration.
    pub fn builder(store: S) -> GeoSearcherBuilder<S> {
        GeoSearcherBuilder::new(store)
    }

    /// Build the geo data to persist on a record write.
    ///
    /// Callers store the returned pair under the field path their queries
    /// will use, and must re-derive it on every coordinate update.
    pub fn create_geo_data(&self, latitude: f64, longitude: f64) -> Result<GeoData, GeonearError> {
        GeoData::new(latitude, longitude).map_err(From::from)
    }

    /// Run a radius search with the searcher's default configuration.
    pub async fn search(&self, query: &GeoQuery) -> Result<Vec<SearchCandidate>, GeonearError> {
        self.search_with_config(query, &self.config).await
    }

    /// Run a radius search with an explicit configuration.
    #[instrument(name = "Search", level = "debug", skip_all)]
    pub async fn search_with_config(
        &self,
        query: &GeoQuery,
        config: &SearchConfig,
    ) -> Result<Vec<SearchCandidate>, GeonearError> {
        radius_search_inner(&self.store, query, config)
            .await
            .map_err(From::from)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the searcher, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: GeoQueryable> From<(S, SearchConfig)> for GeoSearcher<S> {
    fn from((store, config): (S, SearchConfig)) -> Self {
        Self::with_config(store, config)
    }
}

/// Builder for a [`GeoSearcher`] with a customized default configuration.
#[derive(Debug, Clone)]
pub struct GeoSearcherBuilder<S> {
    store: S,
    config: SearchConfigBuilder,
}

impl<S: GeoQueryable> GeoSearcherBuilder<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SearchConfigBuilder::new(),
        }
    }

    /// Set the radius multiplier used during distance filtering.
    #[must_use]
    pub fn buffer_factor(mut self, factor: f64) -> Self {
        self.config = self.config.buffer_factor(factor);
        self
    }

    /// Pin the cell precision instead of deriving it from the radius.
    #[must_use]
    pub fn precision(mut self, chars: usize) -> Self {
        self.config = self.config.precision(chars);
        self
    }

    /// Build the searcher.
    pub fn build(self) -> GeoSearcher<S> {
        GeoSearcher::with_config(self.store, self.config.build())
    }
}
