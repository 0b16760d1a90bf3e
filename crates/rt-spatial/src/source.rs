//! Map data sources: anything that can answer "give me the road graph within
//! `dist_m` of this point for this network type".
//!
//! Two implementations ship with the crate:
//!
//! | Source            | Input                                  | Feature |
//! |-------------------|----------------------------------------|---------|
//! | [`CsvMapSource`]  | `nodes.csv` + `edges.csv`              | —       |
//! | `PbfMapSource`    | OpenStreetMap `.osm.pbf` extract       | `osm`   |
//!
//! Both parse their input into a [`MapExtract`] (optionally memoised across
//! queries) and share [`MapExtract::to_builder`] for truncation and
//! filtering, so they produce identical graphs for identical data.
//!
//! # CSV format
//!
//! ```csv
//! id,lat,lon
//! 101,4.6070,-74.0738
//! 102,4.6051,-74.0729
//! ```
//!
//! ```csv
//! from,to,length_m,highway,oneway
//! 101,102,231.5,residential,no
//! 102,103,,footway,
//! ```
//!
//! `length_m`, `highway` and `oneway` may be empty.  An empty `highway`
//! counts as `unclassified`.  `oneway` follows the OpenStreetMap tag:
//! `yes`/`true`/`1` allow travel from `from` to `to` only, `-1`/`reverse`
//! from `to` to `from` only, and `no`/`false`/`0` both ways.  Without a tag
//! a motorway (or motorway link) is one-way.  Walk networks ignore all of it.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, info};
use serde::Deserialize;

use rt_core::{GeoPoint, NetworkType, NodeId};

use crate::network::RoadNetworkBuilder;
use crate::{SpatialError, SpatialResult};

// ── Query ─────────────────────────────────────────────────────────────────────

/// A graph-from-point request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapQuery {
    /// Centre of the region.
    pub center:    GeoPoint,
    /// Half-width of the square region, in metres.
    pub dist_m:    f32,
    /// Which ways to include.
    pub network:   NetworkType,
    /// Reuse parsed map data from earlier queries on the same source.
    pub use_cache: bool,
}

// ── MapSource trait ───────────────────────────────────────────────────────────

/// Supplier of raw road graphs.
///
/// Implementations return an unbuilt [`RoadNetworkBuilder`] so the loader
/// can run topology passes before the CSR arrays are laid out.  A region
/// with no roads is **not** an error here; it yields an empty builder.
pub trait MapSource: Send + Sync {
    /// Short human-readable name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch the graph of `query.network` ways within `query.dist_m` of
    /// `query.center`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::DataUnavailable`] if the underlying data cannot be
    /// read or parsed.
    fn graph_from_point(&self, query: &MapQuery) -> SpatialResult<RoadNetworkBuilder>;
}

// ── Parsed map data ───────────────────────────────────────────────────────────

/// How the length of a way's segments is known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WayLength {
    /// Compute each segment's haversine length from node positions.
    Measured,
    /// The source states the length of a two-node way (possibly unknown).
    Given(Option<f32>),
}

/// Directions in which a way may be travelled, relative to its `refs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WayDirection {
    #[default]
    Both,
    /// Along `refs` only.
    Forward,
    /// Against `refs` only.
    Reverse,
}

impl WayDirection {
    /// Interpret the `oneway`, `highway` and `junction` tags of a way.
    ///
    /// An explicit `oneway` value always wins; motorways and roundabouts are
    /// one-way only when it is absent or unrecognised.
    pub fn from_tags(oneway: Option<&str>, highway: &str, junction: Option<&str>) -> Self {
        match oneway.map(str::trim) {
            Some("yes" | "1" | "true") => return WayDirection::Forward,
            Some("-1" | "reverse") => return WayDirection::Reverse,
            Some("no" | "0" | "false") => return WayDirection::Both,
            _ => {}
        }
        if matches!(highway, "motorway" | "motorway_link") || junction == Some("roundabout") {
            WayDirection::Forward
        } else {
            WayDirection::Both
        }
    }
}

/// One road as it appears in the source data.
#[derive(Clone, Debug)]
pub struct MapWay {
    /// Source node ids in digitised order.
    pub refs:      Vec<i64>,
    pub highway:   String,
    pub direction: WayDirection,
    pub length:    WayLength,
}

/// Source-agnostic parse result: node positions by source id plus the ways
/// connecting them.
#[derive(Clone, Debug, Default)]
pub struct MapExtract {
    pub nodes: HashMap<i64, GeoPoint>,
    pub ways:  Vec<MapWay>,
}

impl MapExtract {
    /// Truncate to the query's bounding box, keep ways of the query's
    /// network type, and emit directed edges.
    ///
    /// A way segment is kept only if both of its nodes lie inside the box.
    /// Nodes are numbered in ascending source-id order so the result does
    /// not depend on hash-map iteration order.
    pub fn to_builder(&self, query: &MapQuery) -> RoadNetworkBuilder {
        let bbox = query.center.bbox_around(query.dist_m);
        let inside = |id: &i64| self.nodes.get(id).is_some_and(|p| bbox.contains(*p));

        let ways: Vec<&MapWay> = self
            .ways
            .iter()
            .filter(|w| query.network.includes_highway(&w.highway))
            .collect();

        // Nodes referenced by at least one kept segment.
        let mut used: Vec<i64> = ways
            .iter()
            .flat_map(|w| w.refs.windows(2))
            .filter(|pair| inside(&pair[0]) && inside(&pair[1]))
            .flat_map(|pair| [pair[0], pair[1]])
            .collect();
        used.sort_unstable();
        used.dedup();

        let mut builder = RoadNetworkBuilder::with_capacity(used.len(), used.len() * 2);
        let mut to_node: HashMap<i64, NodeId> = HashMap::with_capacity(used.len());
        for id in used {
            let pos = self.nodes[&id];
            to_node.insert(id, builder.add_source_node(id, pos));
        }

        for way in ways {
            let direction = if query.network.respects_oneway() {
                way.direction
            } else {
                WayDirection::Both
            };
            for pair in way.refs.windows(2) {
                let (Some(&from), Some(&to)) = (to_node.get(&pair[0]), to_node.get(&pair[1])) else {
                    continue;
                };
                let length_m = match way.length {
                    WayLength::Measured => {
                        Some(builder.node_pos(from).distance_m(builder.node_pos(to)))
                    }
                    WayLength::Given(len) => len,
                };
                match direction {
                    WayDirection::Both    => builder.add_road(from, to, length_m),
                    WayDirection::Forward => builder.add_directed_edge(from, to, length_m),
                    WayDirection::Reverse => builder.add_directed_edge(to, from, length_m),
                }
            }
        }

        debug!(
            "truncated to {} nodes / {} edges within {} m of {}",
            builder.node_count(),
            builder.edge_count(),
            query.dist_m,
            query.center
        );
        builder
    }
}

/// Memoised parse shared by the file-backed sources.
#[derive(Default)]
pub(crate) struct ExtractCache {
    cell: OnceLock<MapExtract>,
}

impl ExtractCache {
    /// Run `f` on the cached extract, parsing it with `parse` first if it is
    /// not cached yet.  With `use_cache == false` the data is always parsed
    /// afresh and the cache is left untouched.
    pub(crate) fn with<T>(
        &self,
        use_cache: bool,
        parse: impl FnOnce() -> SpatialResult<MapExtract>,
        f: impl FnOnce(&MapExtract) -> T,
    ) -> SpatialResult<T> {
        if !use_cache {
            return Ok(f(&parse()?));
        }
        if let Some(extract) = self.cell.get() {
            return Ok(f(extract));
        }
        let parsed = parse()?;
        Ok(f(self.cell.get_or_init(|| parsed)))
    }
}

// ── CsvMapSource ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  i64,
    lat: f32,
    lon: f32,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:     i64,
    to:       i64,
    length_m: Option<f32>,
    highway:  Option<String>,
    oneway:   Option<String>,
}

/// Map source backed by a pair of CSV files (see the module docs).
pub struct CsvMapSource {
    name:       String,
    nodes_path: PathBuf,
    edges_path: PathBuf,
    cache:      ExtractCache,
}

impl CsvMapSource {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        let nodes_path = nodes_path.into();
        let edges_path = edges_path.into();
        Self {
            name: format!("csv:{}", nodes_path.display()),
            nodes_path,
            edges_path,
            cache: ExtractCache::default(),
        }
    }

    /// Source reading `nodes.csv` and `edges.csv` from `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(dir.join("nodes.csv"), dir.join("edges.csv"))
    }

    fn parse(&self) -> SpatialResult<MapExtract> {
        let open = |p: &Path| {
            File::open(p).map_err(|e| {
                SpatialError::unavailable(&self.name, format!("{}: {e}", p.display()))
            })
        };
        let extract = parse_csv_extract(&self.name, open(&self.nodes_path)?, open(&self.edges_path)?)?;
        info!(
            "parsed {} nodes and {} edges from {}",
            extract.nodes.len(),
            extract.ways.len(),
            self.name
        );
        Ok(extract)
    }
}

impl MapSource for CsvMapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn graph_from_point(&self, query: &MapQuery) -> SpatialResult<RoadNetworkBuilder> {
        self.cache.with(query.use_cache, || self.parse(), |x| x.to_builder(query))
    }
}

/// Parse node and edge CSV streams into a [`MapExtract`].
///
/// Useful for testing (pass `std::io::Cursor`s) or for embedding map data.
///
/// # Errors
///
/// [`SpatialError::DataUnavailable`] on malformed rows or on an edge that
/// references an undeclared node.
pub fn parse_csv_extract<N: Read, E: Read>(
    source_name: &str,
    nodes: N,
    edges: E,
) -> SpatialResult<MapExtract> {
    let mut extract = MapExtract::default();

    let mut rdr = csv::Reader::from_reader(nodes);
    for row in rdr.deserialize::<NodeRecord>() {
        let r = row.map_err(|e| SpatialError::unavailable(source_name, e))?;
        extract.nodes.insert(r.id, GeoPoint::new(r.lat, r.lon));
    }

    let mut rdr = csv::Reader::from_reader(edges);
    for row in rdr.deserialize::<EdgeRecord>() {
        let r = row.map_err(|e| SpatialError::unavailable(source_name, e))?;
        for id in [r.from, r.to] {
            if !extract.nodes.contains_key(&id) {
                return Err(SpatialError::unavailable(
                    source_name,
                    format!("edge {} -> {} references unknown node {id}", r.from, r.to),
                ));
            }
        }
        let highway = r.highway.filter(|h| !h.is_empty()).unwrap_or_else(|| "unclassified".to_owned());
        extract.ways.push(MapWay {
            refs:      vec![r.from, r.to],
            direction: WayDirection::from_tags(r.oneway.as_deref(), &highway, None),
            highway,
            length:    WayLength::Given(r.length_m),
        });
    }

    Ok(extract)
}
