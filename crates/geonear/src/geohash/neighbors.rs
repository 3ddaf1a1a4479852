//! Adjacent-cell derivation.

use super::{GeoPoint, Result, codec, wrap_longitude};

/// Direction vectors as `(lat, lon)` steps, due north first, clockwise.
const DIRECTIONS: [(f64, f64); 8] = [
    (1.0, 0.0),   // N
    (1.0, 1.0),   // NE
    (0.0, 1.0),   // E
    (-1.0, 1.0),  // SE
    (-1.0, 0.0),  // S
    (-1.0, -1.0), // SW
    (0.0, -1.0),  // W
    (1.0, -1.0),  // NW
];

/// The eight cells adjacent to `hash`, at the same precision, ordered
/// N, NE, E, SE, S, SW, W, NW.
///
/// Each neighbor is found by stepping one full cell height/width from the
/// decoded center and re-encoding. Longitude steps wrap across the ±180°
/// antimeridian; latitude steps clamp at the poles, so a cell in the top
/// row comes back as its own northern neighbor. Neighbors of geometrically
/// distinct cells are distinct, and no dedup happens here.
pub fn neighbors(hash: &str) -> Result<[String; 8]> {
    let decoded = codec::decode(hash)?;
    let cell_height = decoded.lat_error * 2.0;
    let cell_width = decoded.lon_error * 2.0;
    let length = hash.len();

    let mut cells: [String; 8] = [const { String::new() }; 8];
    for (cell, (lat_step, lon_step)) in cells.iter_mut().zip(DIRECTIONS) {
        let latitude = (decoded.center.latitude() + lat_step * cell_height).clamp(-90.0, 90.0);
        let longitude = wrap_longitude(decoded.center.longitude() + lon_step * cell_width);
        *cell = codec::encode(GeoPoint::new(latitude, longitude)?, length)?;
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geohash::{GeohashError, decode, encode};

    #[test]
    fn neighbors_are_adjacent_cells() {
        let hash = encode(GeoPoint::new(48.8566, 2.3522).unwrap(), 6).unwrap();
        let decoded = decode(&hash).unwrap();
        let cells = neighbors(&hash).unwrap();

        // All eight are distinct, same-length cells, none the center itself.
        for cell in &cells {
            assert_eq!(cell.len(), hash.len());
            assert_ne!(*cell, hash);
        }
        let distinct: std::collections::HashSet<_> = cells.iter().collect();
        assert_eq!(distinct.len(), 8);

        // The northern neighbor sits one cell height above the center.
        let north = decode(&cells[0]).unwrap();
        let expected_lat = decoded.center.latitude() + decoded.lat_error * 2.0;
        assert!((north.center.latitude() - expected_lat).abs() < 1e-9);
        assert!((north.center.longitude() - decoded.center.longitude()).abs() < 1e-9);

        // The eastern neighbor sits one cell width to the right.
        let east = decode(&cells[2]).unwrap();
        let expected_lon = decoded.center.longitude() + decoded.lon_error * 2.0;
        assert!((east.center.longitude() - expected_lon).abs() < 1e-9);
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        let hash = encode(GeoPoint::new(40.7128, -74.0060).unwrap(), 5).unwrap();
        for cell in neighbors(&hash).unwrap() {
            let back = neighbors(&cell).unwrap();
            assert!(
                back.contains(&hash),
                "{hash} should be a neighbor of its neighbor {cell}"
            );
        }
    }

    #[test]
    fn latitude_clamps_at_the_pole() {
        // A single character splits latitude into four rows; 80°N is in the
        // top row, so its northern neighbors clamp back onto the same row.
        let hash = encode(GeoPoint::new(80.0, 10.0).unwrap(), 1).unwrap();
        let cells = neighbors(&hash).unwrap();
        assert_eq!(cells[0], hash); // N
        let south = decode(&cells[4]).unwrap();
        assert!(south.center.latitude() < decode(&hash).unwrap().center.latitude());
    }

    #[test]
    fn longitude_wraps_at_the_antimeridian() {
        let hash = encode(GeoPoint::new(0.0, 179.9).unwrap(), 4).unwrap();
        let east = decode(&neighbors(&hash).unwrap()[2]).unwrap();
        // Stepping east from the last column lands just west of -180.
        assert!(east.center.longitude() < 0.0);
    }

    #[test]
    fn invalid_hash_is_rejected() {
        assert!(matches!(
            neighbors("u4a"),
            Err(GeohashError::InvalidCharacter('a'))
        ));
    }
}
