//! Error types for ADMA telemetry ingest.
//!
//! The taxonomy mirrors the two phases of the driver's life:
//!
//! - **Startup errors** ([`AdmaError::Resolve`], [`AdmaError::SocketCreation`],
//!   [`AdmaError::Bind`], [`AdmaError::Config`]) surface from
//!   [`crate::AdmaConnection::connect`] and abort setup — the driver cannot run
//!   without a bound endpoint.
//! - **Steady-state conditions** ([`AdmaError::SizeMismatch`]) are recoverable:
//!   the ingestion loop logs them and moves on to the next datagram. They never
//!   propagate out of the loop; the variant exists so the validator can report
//!   both observed and expected sizes through one diagnostic value.

use std::io;
use thiserror::Error;

/// Result type alias for ADMA ingest operations.
pub type Result<T, E = AdmaError> = std::result::Result<T, E>;

/// Main error type for ADMA ingest operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AdmaError {
    /// The configured bind target did not resolve to any usable address.
    #[error("invalid address for UDP socket: \"{target}\"")]
    Resolve {
        target: String,
        #[source]
        source: Option<io::Error>,
    },

    /// The resolved socket could not be registered with the async runtime.
    #[error("could not create UDP socket for \"{target}\"")]
    SocketCreation {
        target: String,
        #[source]
        source: io::Error,
    },

    /// Binding the datagram socket to the resolved address failed.
    #[error("could not bind UDP socket with \"{target}\"")]
    Bind {
        target: String,
        #[source]
        source: io::Error,
    },

    /// A received datagram did not match the protocol's fixed packet length.
    #[error("invalid ADMA message size: {observed} instead of {expected}")]
    SizeMismatch { observed: usize, expected: usize },

    /// The supplied configuration could not be parsed or is unusable.
    #[error("invalid configuration: {details}")]
    Config { details: String },
}

impl AdmaError {
    /// Returns whether this error aborts startup.
    ///
    /// Non-fatal errors are absorbed by the ingestion loop and only appear
    /// when calling the validator directly.
    pub fn is_fatal(&self) -> bool {
        match self {
            AdmaError::Resolve { .. } => true,
            AdmaError::SocketCreation { .. } => true,
            AdmaError::Bind { .. } => true,
            AdmaError::Config { .. } => true,
            AdmaError::SizeMismatch { .. } => false,
        }
    }

    /// Helper constructor for resolution failures without an I/O source.
    pub fn unresolved(target: impl Into<String>) -> Self {
        AdmaError::Resolve { target: target.into(), source: None }
    }

    /// Helper constructor for configuration errors.
    pub fn config(details: impl Into<String>) -> Self {
        AdmaError::Config { details: details.into() }
    }
}
