//! Base-32 geohash codec.
//!
//! Encoding bisects the longitude and latitude intervals alternately, one
//! bit at a time starting with longitude, and packs five bits per output
//! character. Decoding replays the same bisection from the character
//! values. The bit parity is a single running counter, so it carries across
//! character boundaries rather than resetting per character.

use super::{BoundingBox, DecodedHash, GeoPoint, GeohashError, Result};

/// Alphabet used by the textual representation. `"~"` sorts after every
/// symbol here, which is what makes `[prefix, prefix + "~"]` a prefix range.
const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Inverse of [`BASE32`], indexed by ASCII byte. `-1` marks bytes outside
/// the alphabet.
const BASE32_INVERSE: [i8; 256] = {
    let mut table = [-1i8; 256];
    let mut i = 0;
    while i < 32 {
        table[BASE32[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// Hash length used for stored records. Nine characters resolve to roughly
/// a 5 m cell, below the accuracy of the coordinates being stored.
pub const FULL_PRECISION: usize = 9;

/// Longest supported hash.
pub const MAX_HASH_LENGTH: usize = 18;

/// Number of decimal digits in the fractional part of a coordinate, mapped
/// to the hash length that preserves that much resolution.
const DIGITS_TO_LENGTH: [usize; 11] = [0, 5, 7, 8, 11, 12, 13, 15, 16, 17, 18];

/// How [`encode_text`] chooses the hash length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Fixed number of characters.
    Chars(usize),
    /// Derive the length from the number of decimal digits the coordinate
    /// text carries, via a fixed digits-to-length table. Only textual input
    /// states its decimal precision, which is why this variant exists on
    /// [`encode_text`] and not on [`encode`].
    FromDecimalDigits,
}

/// Encode a point as a geohash of `length` characters.
///
/// Length 0 produces the empty hash, which denotes the whole globe.
pub fn encode(point: GeoPoint, length: usize) -> Result<String> {
    if length > MAX_HASH_LENGTH {
        return Err(GeohashError::InvalidLength(length));
    }

    let mut lat = (-90.0_f64, 90.0_f64);
    let mut lon = (-180.0_f64, 180.0_f64);
    let mut on_longitude = true;
    let mut value: usize = 0;
    let mut bits = 0;
    let mut hash = String::with_capacity(length);

    while hash.len() < length {
        let (coordinate, interval) = if on_longitude {
            (point.longitude(), &mut lon)
        } else {
            (point.latitude(), &mut lat)
        };
        let mid = (interval.0 + interval.1) / 2.0;
        value <<= 1;
        if coordinate > mid {
            value |= 1;
            interval.0 = mid;
        } else {
            interval.1 = mid;
        }
        on_longitude = !on_longitude;

        bits += 1;
        if bits == 5 {
            hash.push(BASE32[value] as char);
            value = 0;
            bits = 0;
        }
    }
    Ok(hash)
}

/// Encode textual coordinates, choosing the hash length per `precision`.
///
/// With [`Precision::FromDecimalDigits`] the length follows the larger of
/// the two coordinates' decimal-digit counts; `"48.858"`/`"2.294"` carry
/// three digits and yield an eight-character hash.
pub fn encode_text(latitude: &str, longitude: &str, precision: Precision) -> Result<String> {
    let point = GeoPoint::new(parse_coordinate(latitude)?, parse_coordinate(longitude)?)?;
    let length = match precision {
        Precision::Chars(length) => length,
        Precision::FromDecimalDigits => {
            let digits = decimal_digits(latitude).max(decimal_digits(longitude));
            DIGITS_TO_LENGTH[digits.min(DIGITS_TO_LENGTH.len() - 1)]
        }
    };
    encode(point, length)
}

fn parse_coordinate(text: &str) -> Result<f64> {
    text.trim()
        .parse()
        .map_err(|_| GeohashError::InvalidCoordinateText(text.to_string()))
}

fn decimal_digits(text: &str) -> usize {
    text.trim().split_once('.').map_or(0, |(_, fraction)| {
        fraction.chars().take_while(char::is_ascii_digit).count()
    })
}

/// Decode a geohash into its cell midpoint and per-axis error bounds.
///
/// The empty hash decodes to (0, 0) with ±90/±180 error.
pub fn decode(hash: &str) -> Result<DecodedHash> {
    let cell = decode_bounding_box(hash)?;
    let (latitude, longitude) = cell.center();
    Ok(DecodedHash {
        center: GeoPoint {
            latitude,
            longitude,
        },
        lat_error: (cell.max_lat - cell.min_lat) / 2.0,
        lon_error: (cell.max_lon - cell.min_lon) / 2.0,
    })
}

/// Decode a geohash into the bounding box of its cell.
pub fn decode_bounding_box(hash: &str) -> Result<BoundingBox> {
    let mut lat = (-90.0_f64, 90.0_f64);
    let mut lon = (-180.0_f64, 180.0_f64);
    let mut on_longitude = true;

    for symbol in hash.chars() {
        let value = symbol_value(symbol)?;
        for shift in (0..5).rev() {
            let interval = if on_longitude { &mut lon } else { &mut lat };
            let mid = (interval.0 + interval.1) / 2.0;
            if (value >> shift) & 1 == 1 {
                interval.0 = mid;
            } else {
                interval.1 = mid;
            }
            on_longitude = !on_longitude;
        }
    }

    Ok(BoundingBox {
        min_lat: lat.0,
        min_lon: lon.0,
        max_lat: lat.1,
        max_lon: lon.1,
    })
}

fn symbol_value(symbol: char) -> Result<u8> {
    if symbol.is_ascii() {
        let value = BASE32_INVERSE[symbol as usize];
        if value >= 0 {
            return Ok(value as u8);
        }
    }
    Err(GeohashError::InvalidCharacter(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).unwrap()
    }

    #[test]
    fn encode_known_vector() {
        // Reference vector for 57.64911, 10.40744.
        let hash = encode(point(57.64911, 10.40744), 11).unwrap();
        assert_eq!(hash, "u4pruydqqvj");

        // Shorter lengths are prefixes of the longer hash.
        let hash = encode(point(57.64911, 10.40744), 5).unwrap();
        assert_eq!(hash, "u4pru");
    }

    #[test]
    fn decode_known_vector() {
        let decoded = decode("ezs42").unwrap();
        assert!((decoded.center.latitude() - 42.60498046875).abs() < 1e-9);
        assert!((decoded.center.longitude() - -5.60302734375).abs() < 1e-9);
        // Five characters split into 13 longitude and 12 latitude bits.
        assert!((decoded.lat_error - 180.0 / f64::from(1 << 13)).abs() < 1e-12);
        assert!((decoded.lon_error - 360.0 / f64::from(1 << 14)).abs() < 1e-12);
    }

    #[test]
    fn empty_hash_is_the_whole_globe() {
        let decoded = decode("").unwrap();
        assert_eq!(decoded.center.latitude(), 0.0);
        assert_eq!(decoded.center.longitude(), 0.0);
        assert_eq!(decoded.lat_error, 90.0);
        assert_eq!(decoded.lon_error, 180.0);

        let cell = decode_bounding_box("").unwrap();
        assert_eq!(
            cell,
            BoundingBox {
                min_lat: -90.0,
                min_lon: -180.0,
                max_lat: 90.0,
                max_lon: 180.0
            }
        );
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(
            decode("u4a"),
            Err(GeohashError::InvalidCharacter('a'))
        ));
        assert!(matches!(
            decode("u4é"),
            Err(GeohashError::InvalidCharacter('é'))
        ));
        assert!(matches!(
            encode(point(0.0, 0.0), 19),
            Err(GeohashError::InvalidLength(19))
        ));
        assert!(matches!(
            GeoPoint::new(90.5, 0.0),
            Err(GeohashError::InvalidLatitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.5),
            Err(GeohashError::InvalidLongitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(GeohashError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn text_precision_from_decimal_digits() {
        // Three decimal digits map to eight characters.
        let hash = encode_text("48.858", "2.294", Precision::FromDecimalDigits).unwrap();
        assert_eq!(hash.len(), 8);

        // Integer input carries no decimal digits at all.
        let hash = encode_text("48", "2", Precision::FromDecimalDigits).unwrap();
        assert!(hash.is_empty());

        // Ten or more digits saturate at the maximum length.
        let hash =
            encode_text("48.8584123456789", "2.2944991234567", Precision::FromDecimalDigits)
                .unwrap();
        assert_eq!(hash.len(), MAX_HASH_LENGTH);

        let hash = encode_text("48.8584", "2.2945", Precision::Chars(6)).unwrap();
        assert_eq!(hash.len(), 6);

        assert!(matches!(
            encode_text("north", "2.29", Precision::FromDecimalDigits),
            Err(GeohashError::InvalidCoordinateText(_))
        ));
    }

    #[test]
    fn round_trip_stays_within_error_bounds() {
        use rand::Rng;
        let mut rng = rand::rng();

        for _ in 0..200 {
            let original = point(
                rng.random_range(-90.0..=90.0),
                rng.random_range(-180.0..=180.0),
            );
            let mut previous_errors = (f64::INFINITY, f64::INFINITY);

            for length in 1..=FULL_PRECISION {
                let hash = encode(original, length).unwrap();
                let cell = decode_bounding_box(&hash).unwrap();
                assert!(
                    cell.contains(original.latitude(), original.longitude()),
                    "cell of {hash} must contain the encoded point"
                );

                let decoded = decode(&hash).unwrap();
                assert!(
                    (decoded.center.latitude() - original.latitude()).abs() <= decoded.lat_error
                );
                assert!(
                    (decoded.center.longitude() - original.longitude()).abs()
                        <= decoded.lon_error
                );

                // Longer hashes never widen the error bounds.
                assert!(decoded.lat_error <= previous_errors.0);
                assert!(decoded.lon_error <= previous_errors.1);
                previous_errors = (decoded.lat_error, decoded.lon_error);
            }
        }
    }
}
