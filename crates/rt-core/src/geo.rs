//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f32` (single-precision) latitude/longitude.  At the
//! equator this gives ~1 m precision, more than sufficient for city-scale
//! routing while halving memory consumption vs. `f64`.

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f32 = 6_371_009.0;

/// A WGS-84 geographic coordinate stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Like [`new`](Self::new) but rejects out-of-range or non-finite
    /// coordinates.  Use for values that come from user input.
    pub fn checked(lat: f32, lon: f32) -> CoreResult<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if lat_ok && lon_ok {
            Ok(Self { lat, lon })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lon })
        }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy: ±0.5 % (f32 rounding); suitable for edge lengths at city
    /// scale.
    pub fn distance_m(self, other: GeoPoint) -> f32 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Planar midpoint: the arithmetic mean of latitudes and of longitudes.
    ///
    /// Not the geodesic midpoint.  The error is negligible for two points a
    /// few kilometres apart and grows with span and latitude; it is also
    /// wrong across the antimeridian.
    #[inline]
    pub fn midpoint(self, other: GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }

    /// The box extending `dist_m` metres north, south, east and west of
    /// `self`.
    pub fn bbox_around(self, dist_m: f32) -> BoundingBox {
        let d_lat = (dist_m / EARTH_RADIUS_M).to_degrees();
        let d_lon = (dist_m / (EARTH_RADIUS_M * self.lat.to_radians().cos())).to_degrees();
        BoundingBox {
            south: self.lat - d_lat,
            north: self.lat + d_lat,
            west:  self.lon - d_lon,
            east:  self.lon + d_lon,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon box used to truncate map data around a query point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub south: f32,
    pub north: f32,
    pub west:  f32,
    pub east:  f32,
}

impl BoundingBox {
    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}
