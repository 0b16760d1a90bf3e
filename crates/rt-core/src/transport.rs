//! Transit modes and the road network classes they travel on.
//!
//! Parsing is strict: an unrecognised mode string is an error rather than a
//! silent fallback to the default speed.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// The means by which a route is travelled.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransitMode {
    /// On foot.
    Walk,
    /// Private vehicle.
    Drive,
    /// Anything else; routed over every road class at a generic speed.
    Other,
}

impl TransitMode {
    pub const ALL: [TransitMode; 3] = [TransitMode::Walk, TransitMode::Drive, TransitMode::Other];

    /// Lower-case label, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            TransitMode::Walk  => "walk",
            TransitMode::Drive => "drive",
            TransitMode::Other => "other",
        }
    }

    /// Road classes a map source should include for this mode.
    #[inline]
    pub fn network_type(self) -> NetworkType {
        NetworkType::from(self)
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk"          => Ok(TransitMode::Walk),
            "drive"         => Ok(TransitMode::Drive),
            "other" | "all" => Ok(TransitMode::Other),
            _               => Err(CoreError::UnknownMode(s.to_owned())),
        }
    }
}

// ── NetworkType ───────────────────────────────────────────────────────────────

/// Which ways of the underlying map data make up the graph.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NetworkType {
    /// Pedestrian-accessible ways.  Always two-way.
    Walk,
    /// Car-drivable roads.
    Drive,
    /// Every `highway=*` way.
    All,
}

impl NetworkType {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkType::Walk  => "walk",
            NetworkType::Drive => "drive",
            NetworkType::All   => "all",
        }
    }

    /// Whether a way with the given `highway` class belongs to this network.
    pub fn includes_highway(self, highway: &str) -> bool {
        match self {
            NetworkType::All => true,
            NetworkType::Drive => !matches!(
                highway,
                "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
                    | "bridleway" | "corridor" | "proposed" | "construction"
            ),
            NetworkType::Walk => !matches!(
                highway,
                "motorway" | "motorway_link" | "trunk" | "trunk_link"
                    | "proposed" | "construction"
            ),
        }
    }

    /// Whether one-way restrictions apply.  Only pedestrians may walk
    /// either way along a one-way street.
    #[inline]
    pub fn respects_oneway(self) -> bool {
        !matches!(self, NetworkType::Walk)
    }
}

impl From<TransitMode> for NetworkType {
    fn from(mode: TransitMode) -> Self {
        match mode {
            TransitMode::Walk  => NetworkType::Walk,
            TransitMode::Drive => NetworkType::Drive,
            TransitMode::Other => NetworkType::All,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
