//! The `RouteWriter` trait implemented by all backend writers.

use rt_route::PlannedRoute;

use crate::OutputResult;

/// Trait implemented by the CSV and GeoJSON writers.
///
/// All methods are infallible from the renderer's perspective: errors are
/// stored internally and retrieved with
/// [`RouteOutputRenderer::take_error`](crate::RouteOutputRenderer::take_error).
pub trait RouteWriter {
    /// Write one found route.
    fn write_route(&mut self, route: &PlannedRoute) -> OutputResult<()>;

    /// Record a request that produced no route.  Backends with nowhere to
    /// put this may ignore it.
    fn write_skipped(&mut self, label: &str, reason: &str) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
