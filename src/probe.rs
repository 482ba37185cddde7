//! Round-trip latency probe against the device-internal clock.
//!
//! The packet carries the INS time as milliseconds within the current GPS
//! week. Adding the firmware's epoch offset turns that into Unix
//! milliseconds, and the difference to the capture instant is the transport
//! plus processing latency. Diagnostic only — the value is logged and never
//! gates dispatch.

use tracing::info;

use crate::types::{SensorRecord, Timestamp};

/// Offset from the device's week-relative epoch to the Unix epoch, in
/// milliseconds. Protocol constant of the firmware revision.
pub const DEVICE_EPOCH_OFFSET_MS: i64 = 1_592_697_600_000;

/// Latency of one record in milliseconds:
/// `capture_ms − (ins_time_msec + DEVICE_EPOCH_OFFSET_MS)`.
///
/// Negative values indicate clock disagreement between the device and the
/// host, which is itself worth surfacing.
pub fn measure(record: &SensorRecord, capture: Timestamp) -> i64 {
    capture.as_millis() as i64 - (i64::from(record.ins_time_msec) + DEVICE_EPOCH_OFFSET_MS)
}

/// Measure and emit the latency for one record.
pub(crate) fn report(record: &SensorRecord, capture: Timestamp) {
    let latency_ms = measure(record, capture);
    info!(latency_ms, ins_time_week = record.ins_time_week, "ADMA processing latency");
}
