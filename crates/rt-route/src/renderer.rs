//! Renderer trait for consuming planner results.

use crate::{BatchSummary, PlannedRoute, RouteOutcome};

/// Callbacks invoked by [`RoutePlanner::run_batch`][crate::RoutePlanner::run_batch].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: console printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl RouteRenderer for Printer {
///     fn on_route(&mut self, route: &PlannedRoute) {
///         println!("{}: {:.1} min", route.label, route.total_minutes());
///     }
/// }
/// ```
pub trait RouteRenderer {
    /// Called for every request that produced a route.
    fn on_route(&mut self, _route: &PlannedRoute) {}

    /// Called for every request that produced no route (`NoPath` or
    /// `Failed`).
    fn on_skipped(&mut self, _outcome: &RouteOutcome) {}

    /// Called once after the last request.
    fn on_batch_end(&mut self, _summary: &BatchSummary) {}
}

/// A [`RouteRenderer`] that does nothing.
pub struct NoopRenderer;

impl RouteRenderer for NoopRenderer {}
