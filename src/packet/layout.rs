//! Wire layout of the ADMA packet.
//!
//! Every decoded field is declared here as a constant carrying its byte
//! offset, width (from the value type), and little-endian decoding rule.
//! [`Field::at`] const-asserts `offset + width <= ADMA_PACKET_LEN`, so an
//! out-of-bounds table entry fails compilation rather than misbehaving at
//! runtime. The decoder consults only this table; it holds no offsets of
//! its own.
//!
//! Offsets are protocol-revision constants. The device-internal timestamp
//! pair deliberately mixes widths (`u32` milliseconds next to a `u16` week
//! counter), which is why each field is extracted locally instead of casting
//! a block of the buffer to a struct.

use std::marker::PhantomData;

use super::{ADMA_PACKET_LEN, RawPacket};

/// A little-endian scalar that can be lifted out of the packet.
pub(crate) trait WireValue: Copy {
    const WIDTH: usize;

    /// Decode from exactly `WIDTH` bytes.
    fn from_wire(bytes: &[u8]) -> Self;
}

impl WireValue for u8 {
    const WIDTH: usize = 1;

    fn from_wire(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl WireValue for u16 {
    const WIDTH: usize = 2;

    fn from_wire(bytes: &[u8]) -> Self {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }
}

impl WireValue for i16 {
    const WIDTH: usize = 2;

    fn from_wire(bytes: &[u8]) -> Self {
        i16::from_le_bytes([bytes[0], bytes[1]])
    }
}

impl WireValue for u32 {
    const WIDTH: usize = 4;

    fn from_wire(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl WireValue for i32 {
    const WIDTH: usize = 4;

    fn from_wire(bytes: &[u8]) -> Self {
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl WireValue for f32 {
    const WIDTH: usize = 4;

    fn from_wire(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// A fixed-offset field of the packet.
pub(crate) struct Field<T> {
    offset: usize,
    _value: PhantomData<T>,
}

impl<T: WireValue> Field<T> {
    /// Declare a field at `offset`. Bounds are checked at compile time when
    /// the field is a `const`.
    pub(crate) const fn at(offset: usize) -> Self {
        assert!(offset + T::WIDTH <= ADMA_PACKET_LEN);
        Self { offset, _value: PhantomData }
    }

    /// Read the field out of a size-checked packet.
    pub(crate) fn read(&self, packet: &RawPacket) -> T {
        T::from_wire(&packet[self.offset..self.offset + T::WIDTH])
    }

    #[cfg(test)]
    pub(crate) const fn offset(&self) -> usize {
        self.offset
    }
}

/// A fixed-point field: integer on the wire, divided into its semantic unit.
pub(crate) struct ScaledField<T> {
    field: Field<T>,
    divisor: f64,
}

impl<T: WireValue + Into<f64>> ScaledField<T> {
    pub(crate) const fn at(offset: usize, divisor: f64) -> Self {
        Self { field: Field::at(offset), divisor }
    }

    /// Read and scale the field out of a size-checked packet.
    pub(crate) fn read(&self, packet: &RawPacket) -> f64 {
        self.field.read(packet).into() / self.divisor
    }

    #[cfg(test)]
    pub(crate) const fn offset(&self) -> usize {
        self.field.offset()
    }
}

/// Accelerations ship as 1/2500 g per LSB.
pub(crate) const ACC_DIVISOR: f64 = 2500.0;

/// Body rates ship as 0.01 °/s per LSB.
pub(crate) const RATE_DIVISOR: f64 = 100.0;

// Status block
pub(crate) const STATUS_GNSS_MODE: Field<u8> = Field::at(96);

// Body-frame accelerations, g
pub(crate) const ACC_BODY_X: ScaledField<i16> = ScaledField::at(112, ACC_DIVISOR);
pub(crate) const ACC_BODY_Y: ScaledField<i16> = ScaledField::at(114, ACC_DIVISOR);
pub(crate) const ACC_BODY_Z: ScaledField<i16> = ScaledField::at(116, ACC_DIVISOR);

// Body-frame angular rates, °/s
pub(crate) const RATE_BODY_X: ScaledField<i16> = ScaledField::at(136, RATE_DIVISOR);
pub(crate) const RATE_BODY_Y: ScaledField<i16> = ScaledField::at(138, RATE_DIVISOR);
pub(crate) const RATE_BODY_Z: ScaledField<i16> = ScaledField::at(140, RATE_DIVISOR);

// Device-internal time, mixed widths
pub(crate) const INS_TIME_MSEC: Field<u32> = Field::at(584);
pub(crate) const INS_TIME_WEEK: Field<u16> = Field::at(588);

// INS position, 1e-7 ° / 0.01 m per LSB
pub(crate) const INS_LAT_ABS: ScaledField<i32> = ScaledField::at(592, 1e7);
pub(crate) const INS_LON_ABS: ScaledField<i32> = ScaledField::at(596, 1e7);
pub(crate) const INS_HEIGHT: ScaledField<i32> = ScaledField::at(600, 100.0);

// INS heading and horizontal velocity
pub(crate) const INS_YAW: ScaledField<u16> = ScaledField::at(732, 100.0);
pub(crate) const INS_VEL_HOR: Field<f32> = Field::at(736);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn documented_offsets_are_stable() {
        // The device timestamp offsets are fixed by the protocol revision;
        // downstream tooling depends on them.
        assert_eq!(INS_TIME_MSEC.offset(), 584);
        assert_eq!(INS_TIME_WEEK.offset(), 588);
        assert_eq!(INS_LAT_ABS.offset(), 592);
        assert_eq!(INS_LON_ABS.offset(), 596);
        assert_eq!(INS_HEIGHT.offset(), 600);
        assert_eq!(INS_YAW.offset(), 732);
        assert_eq!(INS_VEL_HOR.offset(), 736);
        assert_eq!(STATUS_GNSS_MODE.offset(), 96);
    }

    #[test]
    fn field_reads_are_little_endian() {
        let mut packet = [0u8; ADMA_PACKET_LEN];
        packet[584..588].copy_from_slice(&0x0102_0304u32.to_le_bytes());
        packet[588..590].copy_from_slice(&0x0A0Bu16.to_le_bytes());
        assert_eq!(INS_TIME_MSEC.read(&packet), 0x0102_0304);
        assert_eq!(INS_TIME_WEEK.read(&packet), 0x0A0B);
    }

    #[test]
    fn scaled_read_divides_exactly() {
        let mut packet = [0u8; ADMA_PACKET_LEN];
        packet[592..596].copy_from_slice(&480_000_000i32.to_le_bytes());
        packet[732..734].copy_from_slice(&9000u16.to_le_bytes());
        assert_eq!(INS_LAT_ABS.read(&packet), 48.0);
        assert_eq!(INS_YAW.read(&packet), 90.0);
    }

    proptest! {
        #[test]
        fn u32_field_reads_any_value(value in any::<u32>()) {
            let mut packet = [0u8; ADMA_PACKET_LEN];
            packet[584..588].copy_from_slice(&value.to_le_bytes());
            prop_assert_eq!(INS_TIME_MSEC.read(&packet), value);
        }

        #[test]
        fn i16_scaled_field_reads_any_value(value in any::<i16>()) {
            let mut packet = [0u8; ADMA_PACKET_LEN];
            packet[136..138].copy_from_slice(&value.to_le_bytes());
            prop_assert_eq!(RATE_BODY_X.read(&packet), f64::from(value) / RATE_DIVISOR);
        }

        #[test]
        fn f32_field_preserves_bit_patterns(value in any::<f32>()) {
            let mut packet = [0u8; ADMA_PACKET_LEN];
            packet[736..740].copy_from_slice(&value.to_le_bytes());
            prop_assert_eq!(INS_VEL_HOR.read(&packet).to_bits(), value.to_bits());
        }
    }
}
