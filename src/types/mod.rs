//! Core types for decoded ADMA telemetry.
//!
//! [`SensorRecord`] is the fundamental data unit that flows through the
//! system: one per received datagram, populated entirely by the decoder and
//! the stamper, consumed by the dispatcher. [`GnssFix`] and [`ImuSample`]
//! are the per-sink views derived from it; heading and velocity travel as
//! bare scalars.

mod record;
mod views;

pub use record::{SensorRecord, Timestamp};
pub use views::{GnssFix, GnssMode, ImuSample};
