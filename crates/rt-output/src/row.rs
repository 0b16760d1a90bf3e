//! Plain data row types written by output backends.

use rt_route::PlannedRoute;

/// One line of `routes.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummaryRow {
    pub label:            String,
    pub mode:             &'static str,
    pub origin_node:      u32,
    pub destination_node: u32,
    /// Number of graph nodes on the path, endpoints included.
    pub nodes:            usize,
    pub total_minutes:    f64,
    pub length_m:         f64,
}

impl RouteSummaryRow {
    pub fn from_route(route: &PlannedRoute) -> Self {
        Self {
            label:            route.label.clone(),
            mode:             route.mode.as_str(),
            origin_node:      route.origin_node.0,
            destination_node: route.destination_node.0,
            nodes:            route.route.nodes.len(),
            total_minutes:    route.total_minutes(),
            length_m:         route.length_m,
        }
    }
}

/// Role of a point in `route_points.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// The requested start coordinate.
    Origin,
    /// A graph node on the route.
    Path,
    /// The requested end coordinate.
    Destination,
}

impl PointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PointKind::Origin      => "origin",
            PointKind::Path        => "path",
            PointKind::Destination => "destination",
        }
    }
}

/// One line of `route_points.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePointRow {
    pub seq:  u32,
    pub kind: PointKind,
    pub lat:  f32,
    pub lon:  f32,
}

impl RoutePointRow {
    /// Origin marker, then every path node in travel order, then the
    /// destination marker.  `seq` counts from 0.
    pub fn for_route(route: &PlannedRoute) -> Vec<Self> {
        let markers = [
            (PointKind::Origin, route.origin),
            (PointKind::Destination, route.destination),
        ];
        let path = route.path.iter().map(|&p| (PointKind::Path, p));

        std::iter::once(markers[0])
            .chain(path)
            .chain(std::iter::once(markers[1]))
            .enumerate()
            .map(|(i, (kind, p))| Self { seq: i as u32, kind, lat: p.lat, lon: p.lon })
            .collect()
    }
}
