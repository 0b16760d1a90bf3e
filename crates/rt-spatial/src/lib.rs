//! `rt-spatial`: the routing subsystem.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`              |
//! | [`source`]   | `MapSource` trait, `MapQuery`, `CsvMapSource`                   |
//! | [`osm`]      | `PbfMapSource` (feature = `"osm"` only)                         |
//! | [`simplify`] | Degree-2 chain merging, largest-component retention             |
//! | [`loader`]   | `GraphLoader`, `LoaderConfig`                                   |
//! | [`weights`]  | `SpeedTable`, `assign_weights`                                  |
//! | [`locate`]   | `nearest_node`                                                  |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                       |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                              |
//!
//! # Pipeline
//!
//! ```text
//! GraphLoader::load ─► assign_weights ─► nearest_node ×2 ─► Router::route
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod locate;
pub mod network;
pub mod router;
pub mod simplify;
pub mod source;
pub mod weights;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{SpatialError, SpatialResult};
pub use loader::{DEFAULT_BUFFER_KM, GraphLoader, LoaderConfig};
pub use locate::nearest_node;
pub use network::{DEFAULT_EDGE_LENGTH_M, RoadNetwork, RoadNetworkBuilder};
pub use router::{DijkstraRouter, Route, Router};
pub use source::{CsvMapSource, MapExtract, MapQuery, MapSource, MapWay, WayDirection, WayLength, parse_csv_extract};
pub use weights::{SpeedTable, assign_weights, assign_weights_with};

#[cfg(feature = "osm")]
pub use osm::PbfMapSource;
