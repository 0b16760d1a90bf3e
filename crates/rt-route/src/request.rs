//! Named route requests and their CSV loader.
//!
//! # CSV format
//!
//! ```csv
//! label,mode,start_lat,start_lon,end_lat,end_lon,buffer_km
//! Home -> Externado on foot,walk,4.606979,-74.073794,4.595600,-74.069014,
//! Externado -> Ibero by car,drive,4.595600,-74.069014,4.649893,-74.057384,8
//! ```
//!
//! `mode` is one of `walk`, `drive`, `other` (alias `all`).  An empty
//! `buffer_km` uses [`DEFAULT_BUFFER_KM`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rt_core::{GeoPoint, TransitMode};
use rt_spatial::DEFAULT_BUFFER_KM;

use crate::{RouteError, RouteResult};

/// One named origin → destination query.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    /// Free-text description shown in logs and output files.
    pub label:     String,
    pub mode:      TransitMode,
    pub start:     GeoPoint,
    pub end:       GeoPoint,
    /// Radius of the loaded region around the midpoint of `start` and `end`.
    pub buffer_km: f64,
}

impl RouteRequest {
    /// Request with the default buffer radius.
    pub fn new(label: impl Into<String>, mode: TransitMode, start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            label: label.into(),
            mode,
            start,
            end,
            buffer_km: DEFAULT_BUFFER_KM,
        }
    }

    pub fn with_buffer_km(mut self, buffer_km: f64) -> Self {
        self.buffer_km = buffer_km;
        self
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestRecord {
    label:     String,
    mode:      String,
    start_lat: f32,
    start_lon: f32,
    end_lat:   f32,
    end_lon:   f32,
    buffer_km: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load route requests from a CSV file, in file order.
pub fn load_requests_csv(path: &Path) -> RouteResult<Vec<RouteRequest>> {
    let file = std::fs::File::open(path)?;
    load_requests_reader(file)
}

/// Like [`load_requests_csv`] but accepts any `Read` source.
///
/// # Errors
///
/// - [`RouteError::Parse`] for malformed rows.
/// - [`RouteError::Core`] for an unknown mode or out-of-range coordinate.
pub fn load_requests_reader<R: Read>(reader: R) -> RouteResult<Vec<RouteRequest>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut requests = Vec::new();

    for result in csv_reader.deserialize::<RequestRecord>() {
        let r = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        requests.push(RouteRequest {
            mode:      r.mode.parse()?,
            start:     GeoPoint::checked(r.start_lat, r.start_lon)?,
            end:       GeoPoint::checked(r.end_lat, r.end_lon)?,
            buffer_km: r.buffer_km.unwrap_or(DEFAULT_BUFFER_KM),
            label:     r.label,
        });
    }

    Ok(requests)
}
