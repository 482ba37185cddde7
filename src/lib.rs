//! Async ingest library for GeneSys ADMA inertial/GNSS telemetry over UDP.
//!
//! The ADMA measurement unit broadcasts one fixed-length binary datagram per
//! measurement cycle. Admalink binds the configured endpoint, decodes each
//! datagram into typed motion and positioning quantities, stamps it with a
//! single capture-time clock reading, and fans it out to five independent
//! output streams: full record, GNSS fix, IMU sample, heading, velocity.
//!
//! # Features
//!
//! - **Tolerant receive loop**: wait timeouts, receive errors, and malformed
//!   datagrams are logged and absorbed; the feed recovers on the next packet
//! - **Statically checked decode**: every wire field lives in a const offset
//!   table whose bounds are verified at compile time
//! - **Consistent timestamps**: one clock read per datagram, shared by the
//!   record and every sink view
//! - **Optional latency probe**: compares the device-internal clock against
//!   capture time for transport diagnostics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use admalink::{Admalink, AdmaConfig};
//! use futures::StreamExt;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> admalink::Result<()> {
//!     let connection = Admalink::connect(AdmaConfig::default()).await?;
//!     let mut fixes = connection.fixes();
//!
//!     while let Some(fix) = fixes.next().await {
//!         println!("lat {:.7}° lon {:.7}°", fix.latitude, fix.longitude);
//!     }
//!     Ok(())
//! }
//! ```

mod clock;
mod config;
mod connection;
mod dispatch;
mod driver;
mod endpoint;
mod error;
#[cfg(test)]
mod test_utils;

pub mod packet;
pub mod probe;
pub mod types;

// Core exports
pub use clock::{Clock, SystemClock};
pub use config::AdmaConfig;
pub use connection::AdmaConnection;
pub use driver::{Driver, DriverChannels};
pub use endpoint::{Endpoint, UdpEndpoint, WaitOutcome};
pub use error::{AdmaError, Result};
pub use packet::{ADMA_PACKET_LEN, RawPacket, decode, validate};
pub use types::{GnssFix, GnssMode, ImuSample, SensorRecord, Timestamp};

/// Unified entry point for ADMA telemetry connections.
///
/// # Example
///
/// ```rust,no_run
/// use admalink::{Admalink, AdmaConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> admalink::Result<()> {
/// let config = AdmaConfig { destination_port: 2040, ..AdmaConfig::default() };
/// let connection = Admalink::connect(config).await?;
/// # Ok(())
/// # }
/// ```
pub struct Admalink;

impl Admalink {
    /// Connect to a live ADMA unit with the given configuration.
    ///
    /// Binds the configured UDP endpoint and spawns the ingestion driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind target does not resolve, the socket
    /// cannot be created, or binding fails. These are the only fatal
    /// conditions; everything after startup is absorbed by the driver.
    pub async fn connect(config: AdmaConfig) -> Result<AdmaConnection> {
        AdmaConnection::connect(config).await
    }
}
