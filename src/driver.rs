//! Driver spawns and manages the packet ingestion task.
//!
//! One spawned task exclusively owns the endpoint and the whole
//! decode/dispatch pipeline: wait for readiness, receive one datagram,
//! validate its size, decode, stamp, optionally probe latency, dispatch.
//! Every recoverable condition (wait timeout, receive error, size mismatch)
//! logs and re-enters the wait state — the loop runs until cancelled and
//! never gives up on the feed.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::clock::Clock;
use crate::config::AdmaConfig;
use crate::dispatch::Dispatcher;
use crate::endpoint::{Endpoint, WaitOutcome};
use crate::packet::{self, ADMA_PACKET_LEN};
use crate::probe;
use crate::types::{GnssFix, ImuSample, SensorRecord};

/// Receivers for the output channels of a running driver.
pub struct DriverChannels {
    /// Full decoded records.
    pub records: watch::Receiver<Option<Arc<SensorRecord>>>,
    /// GNSS fix views.
    pub fixes: watch::Receiver<Option<Arc<GnssFix>>>,
    /// IMU sample views.
    pub imu_samples: watch::Receiver<Option<Arc<ImuSample>>>,
    /// Heading scalars, degrees.
    pub headings: watch::Receiver<Option<f64>>,
    /// Horizontal velocity scalars, m/s.
    pub velocities: watch::Receiver<Option<f64>>,
    /// Cancellation token for graceful shutdown.
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the ingestion task.
pub struct Driver;

impl Driver {
    /// Spawn the ingestion loop for a bound endpoint.
    ///
    /// The endpoint moves into the task and is released when the task ends.
    /// Returns watch receivers for the five output channels plus a
    /// cancellation token for graceful shutdown.
    pub fn spawn<E, C>(endpoint: E, config: AdmaConfig, clock: C) -> DriverChannels
    where
        E: Endpoint,
        C: Clock,
    {
        let (record_tx, record_rx) = watch::channel(None);
        let (fix_tx, fix_rx) = watch::channel(None);
        let (imu_tx, imu_rx) = watch::channel(None);
        let (heading_tx, heading_rx) = watch::channel(None);
        let (velocity_tx, velocity_rx) = watch::channel(None);

        let dispatcher = Dispatcher::new(
            record_tx,
            fix_tx,
            imu_tx,
            heading_tx,
            velocity_tx,
            Arc::from(config.gnss_frame.as_str()),
            Arc::from(config.imu_frame.as_str()),
        );

        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::ingest_task(endpoint, config, clock, dispatcher, cancel_task).await;
        });

        DriverChannels {
            records: record_rx,
            fixes: fix_rx,
            imu_samples: imu_rx,
            headings: heading_rx,
            velocities: velocity_rx,
            cancel,
        }
    }

    /// Ingestion loop: wait → receive → validate → decode → stamp →
    /// dispatch, repeated until cancellation.
    async fn ingest_task<E, C>(
        mut endpoint: E,
        config: AdmaConfig,
        clock: C,
        dispatcher: Dispatcher,
        cancel: CancellationToken,
    ) where
        E: Endpoint,
        C: Clock,
    {
        info!(endpoint = %config.bind_target(), "ADMA ingestion started");
        let wait_timeout = config.wait_timeout();
        let mut buf = [0u8; ADMA_PACKET_LEN];
        let mut packet_count = 0u64;

        loop {
            if cancel.is_cancelled() {
                info!("Ingestion cancelled");
                break;
            }

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Ingestion cancelled during wait");
                    break;
                }
                outcome = endpoint.wait(wait_timeout) => outcome,
            };

            match outcome {
                WaitOutcome::TimedOut => {
                    // Liveness signal while the device is silent
                    info!("Waiting for ADMA data...");
                    continue;
                }
                WaitOutcome::Failed(e) => {
                    warn!(error = %e, "Readiness wait failed");
                    continue;
                }
                WaitOutcome::Ready => {}
            }

            let received = match endpoint.receive(&mut buf) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    // Spurious readiness; nothing was actually queued
                    debug!("Readiness without data");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "Receive error");
                    continue;
                }
            };

            let datagram = match packet::validate(&buf[..received]) {
                Ok(datagram) => datagram,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };

            // One clock read serves the record and every sink header
            let capture = clock.now();
            let mut record = packet::decode(datagram);
            record.stamp(capture);
            packet_count += 1;
            trace!(
                packet = packet_count,
                ins_time_msec = record.ins_time_msec,
                "Decoded ADMA packet"
            );

            if config.use_performance_check {
                probe::report(&record, capture);
            }

            dispatcher.dispatch(Arc::new(record));
        }

        info!(packets = packet_count, "ADMA ingestion ended");
    }
}
