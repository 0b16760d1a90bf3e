//! `rt-output`: route output writers for the rust_route planner.
//!
//! Two backends are provided:
//!
//! | Backend  | Files created                                       |
//! |----------|-----------------------------------------------------|
//! | CSV      | `routes.csv`, `route_points.csv`, `skipped.csv`     |
//! | GeoJSON  | `routes.geojson`                                    |
//!
//! Both implement [`RouteWriter`] and are driven by
//! [`RouteOutputRenderer`], which implements `rt_route::RouteRenderer`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rt_output::{CsvWriter, RouteOutputRenderer};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut renderer = RouteOutputRenderer::new(writer);
//! planner.run_batch(&requests, &mut renderer);
//! renderer.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use geojson::GeoJsonWriter;
pub use observer::RouteOutputRenderer;
pub use row::{PointKind, RoutePointRow, RouteSummaryRow};
pub use writer::RouteWriter;
