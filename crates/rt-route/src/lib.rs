//! `rt-route`: per-request routing orchestrator.
//!
//! # Pipeline per request
//!
//! ```text
//! RouteRequest
//!   ① Load       GraphLoader::load(mode, start, end, buffer_km)
//!   ② Weight     assign_weights_with(network, mode, speeds)
//!   ③ Snap       nearest_node(start), nearest_node(end)
//!   ④ Search     Router::route(origin, destination)
//!   ⑤ Report     RouteOutcome::{Found, NoPath, Failed}
//! ```
//!
//! Every request builds and owns its own network; nothing is shared between
//! requests except the map source's parse cache.  Failures never escape
//! [`RoutePlanner::process_route`]: they become outcomes, so one bad request
//! in a batch does not stop its siblings.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rt_route::{NoopRenderer, RoutePlanner, RouteRequest};
//! use rt_spatial::{CsvMapSource, DijkstraRouter, GraphLoader, LoaderConfig};
//!
//! let loader = GraphLoader::new(CsvMapSource::from_dir(dir), LoaderConfig::default());
//! let planner = RoutePlanner::new(loader, DijkstraRouter);
//! let summary = planner.run_batch(&requests, &mut NoopRenderer);
//! ```

pub mod error;
pub mod outcome;
pub mod planner;
pub mod renderer;
pub mod request;

#[cfg(test)]
mod tests;

pub use error::{RouteError, RouteResult};
pub use outcome::{BatchSummary, PlannedRoute, RouteOutcome};
pub use planner::RoutePlanner;
pub use renderer::{NoopRenderer, RouteRenderer};
pub use request::{RouteRequest, load_requests_csv, load_requests_reader};
