//! OSM PBF map source: enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use rt_spatial::{GraphLoader, LoaderConfig, PbfMapSource};
//!
//! let loader = GraphLoader::new(PbfMapSource::new("bogota.osm.pbf"), LoaderConfig::default());
//! ```
//!
//! # What is loaded
//!
//! Every `highway=*` way is parsed once; the network-type filter and the
//! bounding-box truncation happen per query in
//! [`MapExtract::to_builder`](crate::source::MapExtract::to_builder), so a
//! cached extract serves walk and drive queries alike.  Segment lengths are
//! haversine distances between consecutive way nodes.
//!
//! # Memory note
//!
//! The first pass buffers every OSM node in a `HashMap<i64, GeoPoint>`
//! because ways reference nodes by OSM id.  Nodes not referenced by any road
//! are dropped before the extract is returned (and cached).

use std::collections::HashSet;
use std::path::PathBuf;

use log::info;
use osmpbf::{Element, ElementReader};

use rt_core::GeoPoint;

use crate::network::RoadNetworkBuilder;
use crate::source::{ExtractCache, MapExtract, MapQuery, MapSource, MapWay, WayDirection, WayLength};
use crate::{SpatialError, SpatialResult};

/// Map source reading an OpenStreetMap PBF extract from disk.
pub struct PbfMapSource {
    name:  String,
    path:  PathBuf,
    cache: ExtractCache,
}

impl PbfMapSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("pbf:{}", path.display()),
            path,
            cache: ExtractCache::default(),
        }
    }

    fn parse(&self) -> SpatialResult<MapExtract> {
        let reader = ElementReader::from_path(&self.path)
            .map_err(|e| SpatialError::unavailable(&self.name, e))?;

        let mut extract = MapExtract::default();

        reader
            .for_each(|elem| match elem {
                Element::Node(n) => {
                    extract.nodes.insert(n.id(), GeoPoint::new(n.lat() as f32, n.lon() as f32));
                }
                Element::DenseNode(n) => {
                    extract.nodes.insert(n.id(), GeoPoint::new(n.lat() as f32, n.lon() as f32));
                }
                Element::Way(w) => {
                    // Collect tags eagerly so &str lifetimes don't escape the closure.
                    let tags: Vec<(&str, &str)> = w.tags().collect();
                    let Some(highway) = tag(&tags, "highway") else {
                        return;
                    };
                    let direction = WayDirection::from_tags(
                        tag(&tags, "oneway"),
                        highway,
                        tag(&tags, "junction"),
                    );
                    extract.ways.push(MapWay {
                        refs:      w.refs().collect(),
                        highway:   highway.to_owned(),
                        direction,
                        length:    WayLength::Measured,
                    });
                }
                _ => {}
            })
            .map_err(|e| SpatialError::unavailable(&self.name, e))?;

        // Free nodes that no road references.
        let referenced: HashSet<i64> = extract
            .ways
            .iter()
            .flat_map(|w| w.refs.iter().copied())
            .collect();
        extract.nodes.retain(|id, _| referenced.contains(id));

        info!(
            "parsed {} road nodes and {} ways from {}",
            extract.nodes.len(),
            extract.ways.len(),
            self.name
        );
        Ok(extract)
    }
}

impl MapSource for PbfMapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn graph_from_point(&self, query: &MapQuery) -> SpatialResult<RoadNetworkBuilder> {
        self.cache.with(query.use_cache, || self.parse(), |x| x.to_builder(query))
    }
}

fn tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
