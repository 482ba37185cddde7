//! Per-sink views derived from a decoded record.

use std::sync::Arc;

use super::Timestamp;

/// GNSS fix mode reported in the packet status block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GnssMode {
    /// No satellite solution.
    NoFix,
    /// Standalone single-point solution.
    Single,
    /// Differentially corrected solution.
    Differential,
    /// RTK solution with float ambiguities.
    RtkFloat,
    /// RTK solution with fixed ambiguities.
    RtkFixed,
    /// Status byte not recognized by this protocol revision.
    Unknown(u8),
}

impl GnssMode {
    /// Decode the raw status byte.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => GnssMode::NoFix,
            1 => GnssMode::Single,
            2 => GnssMode::Differential,
            4 => GnssMode::RtkFloat,
            8 => GnssMode::RtkFixed,
            other => GnssMode::Unknown(other),
        }
    }

    /// Whether the position solution is usable.
    pub fn has_fix(&self) -> bool {
        matches!(
            self,
            GnssMode::Single | GnssMode::Differential | GnssMode::RtkFloat | GnssMode::RtkFixed
        )
    }
}

/// Position solution for the GNSS fix sink.
#[derive(Debug, Clone, PartialEq)]
pub struct GnssFix {
    /// Capture instant shared with the source record.
    pub stamp: Timestamp,
    /// Configured GNSS frame identifier.
    pub frame_id: Arc<str>,
    /// Geodetic latitude, degrees.
    pub latitude: f64,
    /// Geodetic longitude, degrees.
    pub longitude: f64,
    /// Ellipsoidal height, metres.
    pub altitude_m: f64,
    /// Fix mode at capture time.
    pub mode: GnssMode,
}

/// Inertial sample for the IMU sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ImuSample {
    /// Capture instant shared with the source record.
    pub stamp: Timestamp,
    /// Configured IMU frame identifier.
    pub frame_id: Arc<str>,
    /// Body-frame angular rates (x, y, z), rad/s.
    pub angular_velocity: [f64; 3],
    /// Body-frame linear accelerations (x, y, z), m/s².
    pub linear_acceleration: [f64; 3],
}
