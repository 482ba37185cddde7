//! ADMA packet framing: size validation ahead of interpretation.
//!
//! The device emits exactly one fixed-length datagram per measurement cycle.
//! [`validate`] is the only way to obtain a [`RawPacket`] reference, so the
//! decoder can never run over a short or oversized buffer — partial-packet
//! interpretation is ruled out at the type level.

pub(crate) mod layout;

mod decode;

pub use decode::decode;

use crate::{AdmaError, Result};

/// Exact wire size of one ADMA datagram, in bytes.
pub const ADMA_PACKET_LEN: usize = 856;

/// A datagram whose length has been checked against [`ADMA_PACKET_LEN`].
pub type RawPacket = [u8; ADMA_PACKET_LEN];

/// Check a received buffer against the protocol's packet length.
///
/// Pure and side-effect free. A mismatch is a recoverable, per-packet
/// condition; the error carries both sizes for diagnostics.
pub fn validate(buf: &[u8]) -> Result<&RawPacket> {
    buf.try_into().map_err(|_| AdmaError::SizeMismatch {
        observed: buf.len(),
        expected: ADMA_PACKET_LEN,
    })
}
