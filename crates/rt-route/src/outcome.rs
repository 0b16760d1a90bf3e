//! Per-request results handed to renderers and callers.

use rt_core::{GeoPoint, NodeId, TransitMode};
use rt_spatial::Route;

use crate::RouteError;

/// A successfully computed route plus everything a renderer needs.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    pub label:            String,
    pub mode:             TransitMode,
    /// Requested start coordinate (origin marker).
    pub origin:           GeoPoint,
    /// Requested end coordinate (destination marker).
    pub destination:      GeoPoint,
    /// Graph node `origin` snapped to.
    pub origin_node:      NodeId,
    /// Graph node `destination` snapped to.
    pub destination_node: NodeId,
    pub route:            Route,
    /// Node positions along `route`, origin first.
    pub path:             Vec<GeoPoint>,
    /// Physical route length in metres.
    pub length_m:         f64,
}

impl PlannedRoute {
    #[inline]
    pub fn total_minutes(&self) -> f64 {
        self.route.total_minutes
    }
}

/// What happened to one request.
#[derive(Debug)]
pub enum RouteOutcome {
    Found(PlannedRoute),
    /// Graph loaded and endpoints snapped, but the destination is
    /// unreachable.  A normal result, not a failure.
    NoPath {
        label: String,
        from:  NodeId,
        to:    NodeId,
    },
    /// The request could not be answered (data unavailable, empty region,
    /// invalid input).
    Failed {
        label: String,
        error: RouteError,
    },
}

impl RouteOutcome {
    pub fn label(&self) -> &str {
        match self {
            RouteOutcome::Found(p)             => &p.label,
            RouteOutcome::NoPath { label, .. } => label,
            RouteOutcome::Failed { label, .. } => label,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn as_found(&self) -> Option<&PlannedRoute> {
        match self {
            RouteOutcome::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Human-readable reason a request produced no route; `None` if found.
    pub fn skip_reason(&self) -> Option<String> {
        match self {
            RouteOutcome::Found(_) => None,
            RouteOutcome::NoPath { from, to, .. } => {
                Some(format!("no route between {from} and {to}"))
            }
            RouteOutcome::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

/// Outcomes of a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<RouteOutcome>,
}

impl BatchSummary {
    pub fn found(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_found()).count()
    }

    pub fn no_path(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RouteOutcome::NoPath { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RouteOutcome::Failed { .. }))
            .count()
    }
}
