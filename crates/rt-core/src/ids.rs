//! Dense graph identifiers.
//!
//! A `RoadNetwork` numbers its nodes and directed edges from 0 with no gaps,
//! so an id doubles as an index into the network's per-node and per-edge
//! `Vec`s.  Ids are only meaningful within the network that issued them:
//! every request loads its own network and numbers it afresh.

use std::fmt;

/// Declare a `u32` id newtype that displays as `<label> <n>`.
macro_rules! graph_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Placeholder for "not reached" / "not assigned" slots.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

graph_id! {
    /// Node of a road network.
    pub struct NodeId, "node";
}

graph_id! {
    /// Directed edge of a road network.
    pub struct EdgeId, "edge";
}
