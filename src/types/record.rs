//! Decoded sensor record and capture timestamps.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::views::{GnssFix, GnssMode, ImuSample};

/// A wall-clock instant split into whole seconds and nanoseconds.
///
/// This is the header-style representation the sink views carry; the record
/// additionally stores integer milliseconds/nanoseconds because different
/// consumers want different encodings of the same capture instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch.
    pub secs: u64,
    /// Nanoseconds within the current second (`< 1_000_000_000`).
    pub nanos: u32,
}

impl Timestamp {
    /// The epoch itself; the decoder's placeholder until stamping runs.
    pub const ZERO: Self = Self { secs: 0, nanos: 0 };

    /// Build a timestamp from explicit parts.
    pub const fn new(secs: u64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Convert a [`SystemTime`]. An instant before the Unix epoch collapses
    /// to [`Timestamp::ZERO`].
    pub fn from_system_time(instant: SystemTime) -> Self {
        let elapsed = instant.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self { secs: elapsed.as_secs(), nanos: elapsed.subsec_nanos() }
    }

    /// Milliseconds since the Unix epoch.
    pub const fn as_millis(&self) -> u64 {
        self.secs * 1000 + (self.nanos / 1_000_000) as u64
    }

    /// Nanoseconds since the Unix epoch.
    pub const fn as_nanos(&self) -> u64 {
        self.secs * 1_000_000_000 + self.nanos as u64
    }
}

/// One ADMA packet after decode.
///
/// Created fresh per received datagram, populated by
/// [`decode`](crate::packet::decode) and [`SensorRecord::stamp`], handed to
/// the dispatcher, and dropped once no sink holds it any more. Field units
/// are the semantic ones, already converted from the wire's fixed-point
/// encodings.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    /// Capture instant, written by the stamper.
    pub capture: Timestamp,
    /// Capture instant as integer milliseconds since the Unix epoch.
    pub time_msec: u64,
    /// Capture instant as integer nanoseconds since the Unix epoch.
    pub time_nsec: u64,

    /// GNSS fix mode from the packet status block.
    pub gnss_mode: GnssMode,
    /// Geodetic latitude, degrees.
    pub latitude: f64,
    /// Geodetic longitude, degrees.
    pub longitude: f64,
    /// Ellipsoidal height, metres.
    pub altitude_m: f64,

    /// Body-frame angular rates (x, y, z), rad/s.
    pub angular_rate: [f64; 3],
    /// Body-frame linear accelerations (x, y, z), m/s².
    pub acceleration: [f64; 3],

    /// INS heading, degrees.
    pub heading: f64,
    /// Horizontal velocity, m/s.
    pub velocity: f64,

    /// Device-internal milliseconds within the GPS week. Diagnostics only.
    pub ins_time_msec: u32,
    /// Device-internal GPS week number. Diagnostics only.
    pub ins_time_week: u16,
}

impl SensorRecord {
    /// Write one capture instant into every representation the sinks use.
    ///
    /// A single clock reading serves the whole iteration — the record's
    /// integer fields and every sink header derive from the same instant, so
    /// views of one packet cannot skew against each other.
    pub fn stamp(&mut self, at: Timestamp) {
        self.capture = at;
        self.time_msec = at.as_millis();
        self.time_nsec = at.as_nanos();
    }

    /// GNSS fix view for the fix sink.
    pub fn gnss_fix(&self, frame_id: &Arc<str>) -> GnssFix {
        GnssFix {
            stamp: self.capture,
            frame_id: Arc::clone(frame_id),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude_m: self.altitude_m,
            mode: self.gnss_mode,
        }
    }

    /// Inertial sample view for the IMU sink.
    pub fn imu_sample(&self, frame_id: &Arc<str>) -> ImuSample {
        ImuSample {
            stamp: self.capture,
            frame_id: Arc::clone(frame_id),
            angular_velocity: self.angular_rate,
            linear_acceleration: self.acceleration,
        }
    }
}
