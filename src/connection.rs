//! Live connection to an ADMA measurement unit.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::Result;
use crate::clock::SystemClock;
use crate::config::AdmaConfig;
use crate::driver::{Driver, DriverChannels};
use crate::endpoint::UdpEndpoint;
use crate::types::{GnssFix, ImuSample, SensorRecord};

/// Live connection to an ADMA unit broadcasting on the configured endpoint.
///
/// Connecting binds the socket and spawns the ingestion driver; subscribers
/// then observe the output channels as async streams. The streams have
/// latest-wins semantics — a slow consumer sees the most recent value, not a
/// backlog, matching the continuous nature of the feed.
pub struct AdmaConnection {
    records: watch::Receiver<Option<Arc<SensorRecord>>>,
    fixes: watch::Receiver<Option<Arc<GnssFix>>>,
    imu_samples: watch::Receiver<Option<Arc<ImuSample>>>,
    headings: watch::Receiver<Option<f64>>,
    velocities: watch::Receiver<Option<f64>>,
    local_addr: SocketAddr,
    cancel: CancellationToken,
}

impl AdmaConnection {
    /// Bind the configured endpoint and start the ingestion driver.
    ///
    /// Fails only for the startup conditions (address resolution, socket
    /// creation, bind). Once connected, transient receive problems are
    /// absorbed by the driver and never surface here.
    pub async fn connect(config: AdmaConfig) -> Result<Self> {
        info!(
            address = %config.destination_ip,
            port = config.destination_port,
            "Connecting to ADMA unit"
        );

        let endpoint = UdpEndpoint::bind(&config.destination_ip, config.destination_port).await?;
        let local_addr = endpoint.local_addr();

        let DriverChannels { records, fixes, imu_samples, headings, velocities, cancel } =
            Driver::spawn(endpoint, config, SystemClock);

        info!(%local_addr, "ADMA connection established");
        Ok(Self { records, fixes, imu_samples, headings, velocities, local_addr, cancel })
    }

    /// Stream of full decoded records.
    pub fn records(&self) -> impl Stream<Item = Arc<SensorRecord>> + 'static {
        Self::stream_channel(self.records.clone())
    }

    /// Stream of GNSS fix views.
    pub fn fixes(&self) -> impl Stream<Item = Arc<GnssFix>> + 'static {
        Self::stream_channel(self.fixes.clone())
    }

    /// Stream of IMU sample views.
    pub fn imu_samples(&self) -> impl Stream<Item = Arc<ImuSample>> + 'static {
        Self::stream_channel(self.imu_samples.clone())
    }

    /// Stream of heading scalars, degrees.
    pub fn headings(&self) -> impl Stream<Item = f64> + 'static {
        Self::stream_channel(self.headings.clone())
    }

    /// Stream of horizontal velocity scalars, m/s.
    pub fn velocities(&self) -> impl Stream<Item = f64> + 'static {
        Self::stream_channel(self.velocities.clone())
    }

    /// Most recent decoded record, if any packet has arrived yet.
    pub fn latest_record(&self) -> Option<Arc<SensorRecord>> {
        self.records.borrow().clone()
    }

    /// Local socket address. Reports the OS-assigned port when the
    /// configuration requested port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the ingestion driver. Also happens on drop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Watch channels start at `None` until the first packet arrives; the
    /// stream skips those so subscribers only ever see real values.
    fn stream_channel<T: Clone + Send + Sync + 'static>(
        receiver: watch::Receiver<Option<T>>,
    ) -> impl Stream<Item = T> + 'static {
        WatchStream::new(receiver).filter_map(|opt| async move { opt }).boxed()
    }
}

impl Drop for AdmaConnection {
    fn drop(&mut self) {
        debug!("Dropping ADMA connection");
        self.cancel.cancel();
    }
}
