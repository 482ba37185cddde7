//! Fixed-offset decode of one validated datagram.

use super::{RawPacket, layout};
use crate::types::{GnssMode, SensorRecord, Timestamp};

/// Degrees to radians, for the body-rate fields.
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Standard gravity, m/s² per g, for the acceleration fields.
const STANDARD_GRAVITY: f64 = 9.80665;

/// Decode a size-checked datagram into a [`SensorRecord`].
///
/// Deterministic and total: every documented field is read at its layout
/// table offset, independently of every other field, and converted to its
/// semantic unit. Capture timestamps stay zero until
/// [`SensorRecord::stamp`] runs.
pub fn decode(packet: &RawPacket) -> SensorRecord {
    SensorRecord {
        capture: Timestamp::ZERO,
        time_msec: 0,
        time_nsec: 0,
        gnss_mode: GnssMode::from_raw(layout::STATUS_GNSS_MODE.read(packet)),
        latitude: layout::INS_LAT_ABS.read(packet),
        longitude: layout::INS_LON_ABS.read(packet),
        altitude_m: layout::INS_HEIGHT.read(packet),
        angular_rate: [
            layout::RATE_BODY_X.read(packet) * DEG_TO_RAD,
            layout::RATE_BODY_Y.read(packet) * DEG_TO_RAD,
            layout::RATE_BODY_Z.read(packet) * DEG_TO_RAD,
        ],
        acceleration: [
            layout::ACC_BODY_X.read(packet) * STANDARD_GRAVITY,
            layout::ACC_BODY_Y.read(packet) * STANDARD_GRAVITY,
            layout::ACC_BODY_Z.read(packet) * STANDARD_GRAVITY,
        ],
        heading: layout::INS_YAW.read(packet),
        velocity: f64::from(layout::INS_VEL_HOR.read(packet)),
        ins_time_msec: layout::INS_TIME_MSEC.read(packet),
        ins_time_week: layout::INS_TIME_WEEK.read(packet),
    }
}
