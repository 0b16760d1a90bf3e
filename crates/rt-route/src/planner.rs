//! The `RoutePlanner`: composes loading, weighting, snapping and search for
//! each named request.

use log::{info, warn};

use rt_spatial::{
    GraphLoader, MapSource, Router, SpatialError, SpeedTable, assign_weights_with, nearest_node,
};

use crate::{BatchSummary, PlannedRoute, RouteError, RouteOutcome, RouteRenderer, RouteRequest, RouteResult};

/// Runs route requests against one map source with one routing algorithm.
///
/// # Example
///
/// ```rust,ignore
/// let planner = RoutePlanner::new(loader, DijkstraRouter).speeds(SpeedTable {
///     walk_kmh: 4.5,
///     ..SpeedTable::default()
/// });
/// match planner.process_route(&request) {
///     RouteOutcome::Found(route) => println!("{:.1} min", route.total_minutes()),
///     other => println!("skipped: {:?}", other.skip_reason()),
/// }
/// ```
pub struct RoutePlanner<S: MapSource, R: Router> {
    loader: GraphLoader<S>,
    router: R,
    speeds: SpeedTable,
}

impl<S: MapSource, R: Router> RoutePlanner<S, R> {
    /// Planner using the default [`SpeedTable`].
    pub fn new(loader: GraphLoader<S>, router: R) -> Self {
        Self {
            loader,
            router,
            speeds: SpeedTable::default(),
        }
    }

    /// Replace the mode → speed table.
    pub fn speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn loader(&self) -> &GraphLoader<S> {
        &self.loader
    }

    /// Compute the route for one request.
    ///
    /// Never fails: errors are reported as [`RouteOutcome::NoPath`] or
    /// [`RouteOutcome::Failed`] and logged.
    pub fn process_route(&self, request: &RouteRequest) -> RouteOutcome {
        info!("{}", "=".repeat(100));
        info!("{}", request.label);

        match self.plan(request) {
            Ok(planned) => {
                info!(
                    "route found for {}: {} nodes, {:.0} m, {:.1} min",
                    planned.label,
                    planned.route.nodes.len(),
                    planned.length_m,
                    planned.total_minutes()
                );
                RouteOutcome::Found(planned)
            }
            Err(RouteError::Spatial(SpatialError::NoRoute { from, to })) => {
                warn!("no route found for {}", request.label);
                RouteOutcome::NoPath { label: request.label.clone(), from, to }
            }
            Err(error) => {
                warn!("route {} failed: {error}", request.label);
                RouteOutcome::Failed { label: request.label.clone(), error }
            }
        }
    }

    /// The fallible pipeline behind [`process_route`](Self::process_route).
    ///
    /// # Errors
    ///
    /// Any [`SpatialError`] from loading, weighting, snapping or searching,
    /// wrapped in [`RouteError::Spatial`].  An unreachable destination is
    /// `SpatialError::NoRoute`.
    pub fn plan(&self, request: &RouteRequest) -> RouteResult<PlannedRoute> {
        let mut network = self
            .loader
            .load(request.mode, request.start, request.end, request.buffer_km)?;
        assign_weights_with(&mut network, request.mode, &self.speeds)?;

        let origin_node = nearest_node(&network, request.start)?;
        let destination_node = nearest_node(&network, request.end)?;

        let route = self.router.route(&network, origin_node, destination_node)?;

        Ok(PlannedRoute {
            label:       request.label.clone(),
            mode:        request.mode,
            origin:      request.start,
            destination: request.end,
            origin_node,
            destination_node,
            path:        route.coordinates(&network),
            length_m:    route.length_m(&network),
            route,
        })
    }

    /// Process `requests` in order, handing each result to `renderer`.
    ///
    /// Requests are independent: a failed or unroutable request is reported
    /// through [`RouteRenderer::on_skipped`] and the batch moves on.
    pub fn run_batch<Rd: RouteRenderer>(
        &self,
        requests: &[RouteRequest],
        renderer: &mut Rd,
    ) -> BatchSummary {
        let mut summary = BatchSummary { outcomes: Vec::with_capacity(requests.len()) };

        for request in requests {
            let outcome = self.process_route(request);
            match &outcome {
                RouteOutcome::Found(planned) => renderer.on_route(planned),
                skipped => {
                    info!("no route to render for {}", skipped.label());
                    renderer.on_skipped(skipped);
                }
            }
            summary.outcomes.push(outcome);
        }

        info!(
            "batch complete: {} found, {} without path, {} failed",
            summary.found(),
            summary.no_path(),
            summary.failed()
        );
        renderer.on_batch_end(&summary);
        summary
    }
}
