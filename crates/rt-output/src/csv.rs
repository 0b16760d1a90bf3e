//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `routes.csv`: one summary line per found route
//! - `route_points.csv`: the markers and path coordinates of each route
//! - `skipped.csv`: requests that produced no route, with the reason

use std::fs::File;
use std::path::Path;

use csv::Writer;
use log::debug;

use rt_route::PlannedRoute;

use crate::OutputResult;
use crate::row::{RoutePointRow, RouteSummaryRow};
use crate::writer::RouteWriter;

/// Writes route output to three CSV files.
pub struct CsvWriter {
    routes:   Writer<File>,
    points:   Writer<File>,
    skipped:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record([
            "label",
            "mode",
            "origin_node",
            "destination_node",
            "nodes",
            "total_minutes",
            "length_m",
        ])?;

        let mut points = Writer::from_path(dir.join("route_points.csv"))?;
        points.write_record(["label", "seq", "kind", "lat", "lon"])?;

        let mut skipped = Writer::from_path(dir.join("skipped.csv"))?;
        skipped.write_record(["label", "reason"])?;

        Ok(Self {
            routes,
            points,
            skipped,
            finished: false,
        })
    }
}

impl RouteWriter for CsvWriter {
    fn write_route(&mut self, route: &PlannedRoute) -> OutputResult<()> {
        let row = RouteSummaryRow::from_route(route);
        self.routes.write_record(&[
            row.label.clone(),
            row.mode.to_owned(),
            row.origin_node.to_string(),
            row.destination_node.to_string(),
            row.nodes.to_string(),
            format!("{:.4}", row.total_minutes),
            format!("{:.1}", row.length_m),
        ])?;

        for p in RoutePointRow::for_route(route) {
            self.points.write_record(&[
                route.label.clone(),
                p.seq.to_string(),
                p.kind.as_str().to_owned(),
                p.lat.to_string(),
                p.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_skipped(&mut self, label: &str, reason: &str) -> OutputResult<()> {
        self.skipped.write_record([label, reason])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        self.points.flush()?;
        self.skipped.flush()?;
        debug!("csv route output flushed");
        Ok(())
    }
}
