//! Geohash encoding, decoding, and cell geometry.
//!
//! A geohash is a base-32 string denoting a rectangular latitude/longitude
//! cell. Each character carries five bits of interleaved binary bisection,
//! longitude first, and the interleaving continues seamlessly across
//! character boundaries. Because every extension of a hash denotes a
//! sub-cell of the hash's own cell, the lexicographic range
//! `[prefix, prefix + "~"]` captures exactly the hashes sharing `prefix`,
//! which is what lets a 2-D proximity query run as a handful of 1-D range
//! queries against an ordered store.

pub use error::GeohashError;
mod codec;
mod neighbors;
mod precision;

pub use codec::{FULL_PRECISION, MAX_HASH_LENGTH, Precision, decode, decode_bounding_box, encode, encode_text};
use error::Result;
pub use neighbors::neighbors;
pub use precision::precision_for_radius;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, validating that latitude is within [-90, 90] and
    /// longitude within [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeohashError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeohashError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// The rectangular cell denoted by a geohash, in degrees.
///
/// Invariant: `min_lat <= max_lat` and `min_lon <= max_lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Midpoint of the cell as `(latitude, longitude)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

/// The result of decoding a geohash: the cell midpoint together with the
/// half-width of the final latitude and longitude intervals. The half-widths
/// bound how far the midpoint can be from the coordinates that produced the
/// hash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedHash {
    pub center: GeoPoint,
    pub lat_error: f64,
    pub lon_error: f64,
}

/// A geo-point together with its full-precision geohash, as persisted on a
/// stored record.
///
/// The hash is always `encode(geopoint, FULL_PRECISION)`; constructing
/// through [`GeoData::new`] and updating through [`GeoData::update`] keeps
/// the pair consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoData {
    geopoint: GeoPoint,
    geohash: String,
}

impl GeoData {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let geopoint = GeoPoint::new(latitude, longitude)?;
        let geohash = encode(geopoint, FULL_PRECISION)?;
        Ok(Self { geopoint, geohash })
    }

    /// Move the point, re-deriving the hash. Callers persisting a [`GeoData`]
    /// must write the whole pair back on every coordinate change.
    pub fn update(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        *self = Self::new(latitude, longitude)?;
        Ok(())
    }

    #[must_use]
    pub const fn geopoint(&self) -> GeoPoint {
        self.geopoint
    }

    #[must_use]
    pub fn geohash(&self) -> &str {
        &self.geohash
    }
}

/// Wrap a longitude into [-180, 180] by reducing modulo 360. In-range
/// values pass through unchanged.
pub(crate) fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum GeohashError {
        #[error("Latitude {0} is outside [-90, 90]")]
        InvalidLatitude(f64),
        #[error("Longitude {0} is outside [-180, 180]")]
        InvalidLongitude(f64),
        #[error("Invalid geohash character {0:?}")]
        InvalidCharacter(char),
        #[error("Geohash length {0} exceeds the maximum of {max}", max = super::MAX_HASH_LENGTH)]
        InvalidLength(usize),
        #[error("Coordinate text {0:?} is not a decimal number")]
        InvalidCoordinateText(String),
    }
    pub type Result<T> = std::result::Result<T, GeohashError>;
}
