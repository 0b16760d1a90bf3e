//! GeoJSON output backend.
//!
//! Collects every route as features and writes a single `routes.geojson`
//! FeatureCollection on [`finish`](RouteWriter::finish):
//!
//! - a `LineString` through the path nodes (`kind: "route"`)
//! - a `Point` at the requested origin (`kind: "origin"`)
//! - a `Point` at the requested destination (`kind: "destination"`)
//!
//! Coordinates are `[lon, lat]` as GeoJSON requires.  Skipped requests are
//! not represented.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Value, json};

use rt_core::GeoPoint;
use rt_route::PlannedRoute;

use crate::OutputResult;
use crate::row::{PointKind, RouteSummaryRow};
use crate::writer::RouteWriter;

/// Writes all routes to one GeoJSON file.
pub struct GeoJsonWriter {
    path:     PathBuf,
    features: Vec<Value>,
    finished: bool,
}

impl GeoJsonWriter {
    /// Writer targeting `dir/routes.geojson`.  The file is created by
    /// `finish`, so `dir` must exist by then.
    pub fn new(dir: &Path) -> Self {
        Self {
            path:     dir.join("routes.geojson"),
            features: Vec::new(),
            finished: false,
        }
    }

    /// The features collected so far.
    pub fn features(&self) -> &[Value] {
        &self.features
    }
}

fn position(p: GeoPoint) -> Value {
    json!([p.lon, p.lat])
}

fn marker(label: &str, kind: PointKind, p: GeoPoint) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position(p) },
        "properties": { "label": label, "kind": kind.as_str() },
    })
}

impl RouteWriter for GeoJsonWriter {
    fn write_route(&mut self, route: &PlannedRoute) -> OutputResult<()> {
        let row = RouteSummaryRow::from_route(route);
        let line: Vec<Value> = route.path.iter().map(|&p| position(p)).collect();

        self.features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": line },
            "properties": {
                "label":            row.label,
                "kind":             "route",
                "mode":             row.mode,
                "origin_node":      row.origin_node,
                "destination_node": row.destination_node,
                "nodes":            row.nodes,
                "total_minutes":    row.total_minutes,
                "length_m":         row.length_m,
            },
        }));
        self.features.push(marker(&route.label, PointKind::Origin, route.origin));
        self.features.push(marker(&route.label, PointKind::Destination, route.destination));
        Ok(())
    }

    fn write_skipped(&mut self, _label: &str, _reason: &str) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let collection = json!({
            "type": "FeatureCollection",
            "features": self.features,
        });
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &collection)?;
        out.flush()?;
        debug!("wrote {} features to {}", self.features.len(), self.path.display());
        Ok(())
    }
}
