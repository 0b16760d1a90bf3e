//! GraphLoader: build the bounded road graph for one routing request.
//!
//! ```text
//! midpoint(a, b) ──► MapSource::graph_from_point(center, buffer_km·1000, network)
//!                ──► largest_component   (unless retain_all)
//!                ──► simplify            (if simplify)
//!                ──► build               (CSR + R-tree)
//! ```
//!
//! Loading a small region around the two endpoints instead of a whole city
//! keeps both load time and search cost proportional to the query.

use log::{debug, info};

use rt_core::{GeoPoint, TransitMode};

use crate::network::RoadNetwork;
use crate::simplify::{largest_component, simplify};
use crate::source::{MapQuery, MapSource};
use crate::{SpatialError, SpatialResult};

/// Buffer radius used when a request does not specify one.
pub const DEFAULT_BUFFER_KM: f64 = 5.0;

// ── LoaderConfig ──────────────────────────────────────────────────────────────

/// Options controlling how map data becomes a routing graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoaderConfig {
    /// Let the map source reuse data parsed for an earlier request.
    pub use_cache: bool,

    /// Merge chains of degree-2 nodes into single edges.
    pub simplify: bool,

    /// Keep every connected component instead of only the largest one.
    pub retain_all: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            use_cache:  true,
            simplify:   true,
            retain_all: false,
        }
    }
}

// ── GraphLoader ───────────────────────────────────────────────────────────────

/// Loads per-request road graphs from a [`MapSource`].
pub struct GraphLoader<S: MapSource> {
    source: S,
    config: LoaderConfig,
}

impl<S: MapSource> GraphLoader<S> {
    pub fn new(source: S, config: LoaderConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the `mode` network within `buffer_km` of the midpoint of
    /// `point_a` and `point_b`.
    ///
    /// The returned network is unweighted and may be empty if the region
    /// holds no roads of the requested type.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidBuffer`] if `buffer_km` is not a positive
    ///   finite number.
    /// - [`SpatialError::DataUnavailable`] if the source cannot supply data.
    pub fn load(
        &self,
        mode: TransitMode,
        point_a: GeoPoint,
        point_b: GeoPoint,
        buffer_km: f64,
    ) -> SpatialResult<RoadNetwork> {
        if !(buffer_km.is_finite() && buffer_km > 0.0) {
            return Err(SpatialError::InvalidBuffer(buffer_km));
        }

        let query = MapQuery {
            center:    point_a.midpoint(point_b),
            dist_m:    (buffer_km * 1000.0) as f32,
            network:   mode.network_type(),
            use_cache: self.config.use_cache,
        };
        info!(
            "loading {} network within {} m of {} from {}",
            query.network,
            query.dist_m,
            query.center,
            self.source.name()
        );

        let mut builder = self.source.graph_from_point(&query)?;
        let raw_nodes = builder.node_count();

        if !self.config.retain_all {
            builder = largest_component(builder);
        }
        if self.config.simplify {
            builder = simplify(builder);
        }
        debug!(
            "graph reduced from {raw_nodes} to {} nodes / {} edges",
            builder.node_count(),
            builder.edge_count()
        );

        Ok(builder.build())
    }
}
