//! Shared helpers for building synthetic ADMA datagrams in tests.

#![cfg(test)]

use crate::packet::{ADMA_PACKET_LEN, layout};

/// Builder writing field values at their documented wire offsets.
///
/// Semantic setters (`latitude_deg`, `heading_deg`, ...) quantize to the
/// wire's fixed-point encoding; raw setters place LSB counts directly.
pub(crate) struct PacketBuilder {
    bytes: Vec<u8>,
}

impl PacketBuilder {
    pub(crate) fn new() -> Self {
        Self { bytes: vec![0u8; ADMA_PACKET_LEN] }
    }

    pub(crate) fn gnss_mode(mut self, raw: u8) -> Self {
        self.bytes[layout::STATUS_GNSS_MODE.offset()] = raw;
        self
    }

    pub(crate) fn lat_raw(mut self, raw: i32) -> Self {
        put_i32(&mut self.bytes, layout::INS_LAT_ABS.offset(), raw);
        self
    }

    pub(crate) fn lon_raw(mut self, raw: i32) -> Self {
        put_i32(&mut self.bytes, layout::INS_LON_ABS.offset(), raw);
        self
    }

    pub(crate) fn height_raw(mut self, raw: i32) -> Self {
        put_i32(&mut self.bytes, layout::INS_HEIGHT.offset(), raw);
        self
    }

    pub(crate) fn latitude_deg(self, degrees: f64) -> Self {
        self.lat_raw((degrees * 1e7).round() as i32)
    }

    pub(crate) fn longitude_deg(self, degrees: f64) -> Self {
        self.lon_raw((degrees * 1e7).round() as i32)
    }

    pub(crate) fn altitude_m(self, metres: f64) -> Self {
        self.height_raw((metres * 100.0).round() as i32)
    }

    pub(crate) fn rate_raw(mut self, raw: [i16; 3]) -> Self {
        put_i16(&mut self.bytes, layout::RATE_BODY_X.offset(), raw[0]);
        put_i16(&mut self.bytes, layout::RATE_BODY_Y.offset(), raw[1]);
        put_i16(&mut self.bytes, layout::RATE_BODY_Z.offset(), raw[2]);
        self
    }

    pub(crate) fn rates_dps(self, dps: [f64; 3]) -> Self {
        self.rate_raw([
            (dps[0] * layout::RATE_DIVISOR).round() as i16,
            (dps[1] * layout::RATE_DIVISOR).round() as i16,
            (dps[2] * layout::RATE_DIVISOR).round() as i16,
        ])
    }

    pub(crate) fn acc_raw(mut self, raw: [i16; 3]) -> Self {
        put_i16(&mut self.bytes, layout::ACC_BODY_X.offset(), raw[0]);
        put_i16(&mut self.bytes, layout::ACC_BODY_Y.offset(), raw[1]);
        put_i16(&mut self.bytes, layout::ACC_BODY_Z.offset(), raw[2]);
        self
    }

    pub(crate) fn heading_raw(mut self, raw: u16) -> Self {
        self.bytes[layout::INS_YAW.offset()..layout::INS_YAW.offset() + 2]
            .copy_from_slice(&raw.to_le_bytes());
        self
    }

    pub(crate) fn heading_deg(self, degrees: f64) -> Self {
        self.heading_raw((degrees * 100.0).round() as u16)
    }

    pub(crate) fn velocity_ms(mut self, metres_per_second: f32) -> Self {
        let offset = layout::INS_VEL_HOR.offset();
        self.bytes[offset..offset + 4].copy_from_slice(&metres_per_second.to_le_bytes());
        self
    }

    pub(crate) fn ins_time(mut self, msec: u32, week: u16) -> Self {
        let msec_offset = layout::INS_TIME_MSEC.offset();
        self.bytes[msec_offset..msec_offset + 4].copy_from_slice(&msec.to_le_bytes());
        let week_offset = layout::INS_TIME_WEEK.offset();
        self.bytes[week_offset..week_offset + 2].copy_from_slice(&week.to_le_bytes());
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.bytes
    }
}

fn put_i16(bytes: &mut [u8], offset: usize, value: i16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_i32(bytes: &mut [u8], offset: usize, value: i32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
