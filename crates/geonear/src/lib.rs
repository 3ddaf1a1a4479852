//! Geonear - Geohash Proximity Search Library
//!
//! Geonear answers "what's near me?" against any document collection that
//! can run ordered prefix range queries on a string field. It encodes
//! coordinates as geohashes so that a 2-D radius query becomes nine 1-D
//! range queries (a cell and its eight neighbors), merges and deduplicates
//! the results, re-filters them by true great-circle distance, and returns
//! them sorted nearest-first.
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
//! // Wrap any store implementing the range-query contract.
//! let searcher = GeoSearcher::new(EmptyStore);
//!
//! // On write: derive the geo data to persist with each record.
//! let geo = searcher.create_geo_data(51.5074, -0.1278)?;
//!
//! // On read: everything within 3 km of a center point.
//! let center = GeoPoint::new(51.5074, -0.1278)?;
//! let nearby = searcher
//!     .search(&GeoQuery::new(center, 3.0, "position"))
//!     .await?;
//! for hit in &nearby {
//!     println!("{} at {:.2} km", hit.id, hit.distance_km);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Store-agnostic**: one small async trait ([`GeoQueryable`]) is the
//!   only thing a backend has to provide
//! - **Exact results**: geohash cells over-approximate the circle, then a
//!   haversine filter makes the result set precise
//! - **Concurrent fan-out**: the nine cell queries run concurrently and
//!   fail as one unit
//! - **Tunable**: precision and edge-tolerance buffer configurable per
//!   searcher or per query
//!
//! # Geohashes
//!
//! The codec lives in [`geohash`] and is usable on its own: encoding,
//! decoding with error bounds, bounding boxes, neighbor cells, and
//! radius-to-precision selection.

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
mod distance;
pub mod error;
pub mod geohash;
mod search;
mod store;

pub use self::core::{GeoSearcher, GeoSearcherBuilder};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use geohash::{
    BoundingBox, DecodedHash, FULL_PRECISION, GeoData, GeoPoint, GeohashError, MAX_HASH_LENGTH,
    Precision,
};
pub use search::{GeoQuery, SearchCandidate, SearchError};
pub use store::{Document, GeoQueryable, StoreError, resolve_path};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Geonear library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from Geonear operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use geonear::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), geonear::error::GeonearError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::GeonearError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
