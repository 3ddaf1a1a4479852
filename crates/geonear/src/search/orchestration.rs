//! Fan-out/fan-in search orchestration.
//!
//! A radius query runs in three phases: pick a precision coarse enough
//! that a cell plus its ring of neighbors contains the whole query circle,
//! issue the nine prefix range queries concurrently, then re-filter the
//! merged candidates by true great-circle distance. The cell queries
//! over-approximate the circle; the distance filter (with a small buffer
//! for edge rounding) makes the result exact.

use ahash::AHashSet;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{Result, SearchError};
use crate::{
    config::SearchConfig,
    distance::haversine_km,
    geohash::{self, FULL_PRECISION, GeoData, GeoPoint},
    store::{Document, GeoQueryable, resolve_path},
};

/// A circular "near me" query.
///
/// `field_path` addresses the stored geo data within each document (dotted
/// for nested structure); the documents must carry a `geohash` string and
/// a `geopoint` under that path, as written by
/// [`GeoData`](crate::geohash::GeoData).
#[derive(Debug, Clone)]
pub struct GeoQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub field_path: String,
}

impl GeoQuery {
    pub fn new(center: GeoPoint, radius_km: f64, field_path: impl Into<String>) -> Self {
        Self {
            center,
            radius_km,
            field_path: field_path.into(),
        }
    }
}

/// A document retained by a radius search, annotated with its true
/// distance from the query center.
#[derive(Debug, Clone)]
pub struct SearchCandidate {
    pub id: String,
    pub fields: Value,
    pub distance_km: f64,
}

/// Execute a radius search against `store`.
///
/// Results are deduplicated by document id (first occurrence wins),
/// filtered to the buffered radius, and sorted ascending by distance with
/// ties kept in merge order. A failure of any one cell query fails the
/// whole search; there is no partial aggregation and no retry.
#[instrument(
    name = "Radius Search",
    level = "info",
    skip_all,
    fields(radius_km = query.radius_km, field_path = %query.field_path)
)]
pub async fn radius_search_inner<S>(
    store: &S,
    query: &GeoQuery,
    config: &SearchConfig,
) -> Result<Vec<SearchCandidate>>
where
    S: GeoQueryable + ?Sized,
{
    validate_query(query)?;

    let precision = config
        .precision
        .unwrap_or_else(|| geohash::precision_for_radius(query.radius_km))
        .clamp(1, FULL_PRECISION);
    let buffer_km = query.radius_km * config.buffer_factor;

    // Truncating the full-precision hash gives the cell containing the
    // center at the chosen precision.
    let center_hash = geohash::encode(query.center, FULL_PRECISION)?;
    let center_cell = &center_hash[..precision];

    // The center cell and its eight neighbors. At precision 1 the ring can
    // contain near-duplicate cells; dedup by document id downstream makes
    // the redundant queries harmless.
    let mut cells: Vec<String> = geohash::neighbors(center_cell)?.into();
    cells.push(center_cell.to_string());

    debug!(precision, center_cell, "Fanning out cell range queries");

    let geohash_path = format!("{}.geohash", query.field_path);
    let range_ends: Vec<String> = cells.iter().map(|cell| format!("{cell}~")).collect();
    let per_cell = try_join_all(
        cells
            .iter()
            .zip(&range_ends)
            .map(|(start, end)| store.range_query(&geohash_path, start, end)),
    )
    .await
    .map_err(SearchError::Store)?;

    let merged = per_cell.into_iter().flatten();
    let mut seen = AHashSet::new();
    let mut candidates = Vec::new();
    for document in merged {
        if !seen.insert(document.id.clone()) {
            continue;
        }
        let Some(geo) = geo_data_of(&document, &query.field_path) else {
            debug!(id = %document.id, "Skipping document without geo data");
            continue;
        };
        let distance_km = haversine_km(query.center, geo.geopoint());
        if distance_km <= buffer_km {
            candidates.push(SearchCandidate {
                id: document.id,
                fields: document.fields,
                distance_km,
            });
        }
    }

    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    debug!(result_count = candidates.len(), "Radius search complete");
    Ok(candidates)
}

fn validate_query(query: &GeoQuery) -> Result<()> {
    if !query.radius_km.is_finite() || query.radius_km < 0.0 {
        return Err(SearchError::InvalidQuery(format!(
            "radius must be finite and non-negative, got {}",
            query.radius_km
        )));
    }
    if query.field_path.is_empty() {
        return Err(SearchError::InvalidQuery(
            "field path must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Records whose geo field is absent or malformed are not an error; they
/// are simply not a match.
fn geo_data_of(document: &Document, field_path: &str) -> Option<GeoData> {
    let value = resolve_path(&document.fields, field_path)?;
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_malformed_queries() {
        let center = GeoPoint::new(51.5074, -0.1278).unwrap();

        let query = GeoQuery::new(center, -1.0, "position");
        assert!(matches!(
            validate_query(&query),
            Err(SearchError::InvalidQuery(_))
        ));

        let query = GeoQuery::new(center, f64::NAN, "position");
        assert!(validate_query(&query).is_err());

        let query = GeoQuery::new(center, 1.0, "");
        assert!(validate_query(&query).is_err());

        let query = GeoQuery::new(center, 1.0, "position");
        assert!(validate_query(&query).is_ok());
    }

    #[test]
    fn extracts_geo_data_through_nested_paths() {
        let geo = GeoData::new(48.8566, 2.3522).unwrap();
        let document = Document::new(
            "cafe",
            json!({ "venue": { "position": serde_json::to_value(&geo).unwrap() } }),
        );

        let extracted = geo_data_of(&document, "venue.position").unwrap();
        assert_eq!(extracted, geo);

        assert!(geo_data_of(&document, "venue.elsewhere").is_none());

        // A geohash without a point is malformed, not an error.
        let document = Document::new("bare", json!({ "position": { "geohash": "u09tvw0f6" } }));
        assert!(geo_data_of(&document, "position").is_none());
    }
}
