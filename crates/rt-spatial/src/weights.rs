//! Edge weighting: physical length → estimated traversal minutes.
//!
//! ```text
//! minutes = (length_m / 1000) / speed_kmh * 60
//! ```
//!
//! Weights are always recomputed from the edge length, never from a previous
//! weight, so re-weighting a network for the same mode is idempotent and
//! re-weighting for a different mode needs no reload.

use log::debug;

use rt_core::TransitMode;

use crate::network::{DEFAULT_EDGE_LENGTH_M, RoadNetwork};
use crate::{SpatialError, SpatialResult};

// ── SpeedTable ────────────────────────────────────────────────────────────────

/// Average speed per transit mode, in km/h.
///
/// | Mode    | Default |
/// |---------|---------|
/// | Walk    | 5       |
/// | Drive   | 40      |
/// | Other   | 10      |
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTable {
    pub walk_kmh:  f64,
    pub drive_kmh: f64,
    pub other_kmh: f64,
}

impl SpeedTable {
    pub const WALK_KMH:  f64 = 5.0;
    pub const DRIVE_KMH: f64 = 40.0;
    pub const OTHER_KMH: f64 = 10.0;

    #[inline]
    pub fn speed_kmh(&self, mode: TransitMode) -> f64 {
        match mode {
            TransitMode::Walk  => self.walk_kmh,
            TransitMode::Drive => self.drive_kmh,
            TransitMode::Other => self.other_kmh,
        }
    }

    /// Reject tables with a non-positive or non-finite speed, which would
    /// produce infinite or negative weights.
    pub fn validate(&self) -> SpatialResult<()> {
        for mode in TransitMode::ALL {
            let v = self.speed_kmh(mode);
            if !(v.is_finite() && v > 0.0) {
                return Err(SpatialError::InvalidSpeed(v));
            }
        }
        Ok(())
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            walk_kmh:  Self::WALK_KMH,
            drive_kmh: Self::DRIVE_KMH,
            other_kmh: Self::OTHER_KMH,
        }
    }
}

// ── Weight assignment ─────────────────────────────────────────────────────────

/// Minutes needed to cover `length_m` at `speed_kmh`.  A missing length
/// counts as [`DEFAULT_EDGE_LENGTH_M`].
#[inline]
pub fn travel_minutes(length_m: Option<f32>, speed_kmh: f64) -> f64 {
    let len = f64::from(length_m.unwrap_or(DEFAULT_EDGE_LENGTH_M));
    (len / 1000.0) / speed_kmh * 60.0
}

/// Weight every edge of `network` for `mode` using the default
/// [`SpeedTable`].
pub fn assign_weights(network: &mut RoadNetwork, mode: TransitMode) {
    write_weights(network, mode, SpeedTable::default().speed_kmh(mode));
}

/// Like [`assign_weights`] with a caller-supplied speed table.
///
/// # Errors
///
/// [`SpatialError::InvalidSpeed`] if the table fails
/// [`SpeedTable::validate`]; the network is left untouched.
pub fn assign_weights_with(
    network: &mut RoadNetwork,
    mode: TransitMode,
    speeds: &SpeedTable,
) -> SpatialResult<()> {
    speeds.validate()?;
    write_weights(network, mode, speeds.speed_kmh(mode));
    Ok(())
}

fn write_weights(network: &mut RoadNetwork, mode: TransitMode, speed_kmh: f64) {
    let RoadNetwork { edge_length_m, edge_weight_min, .. } = network;
    for (w, &len) in edge_weight_min.iter_mut().zip(edge_length_m.iter()) {
        *w = travel_minutes(len, speed_kmh);
    }
    network.weighted_for = Some(mode);
    debug!(
        "weighted {} edges for {mode} at {speed_kmh} km/h",
        network.edge_count()
    );
}
