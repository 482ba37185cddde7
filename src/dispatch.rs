//! Fan-out of decoded records to the output channels.

use std::sync::Arc;

use tokio::sync::watch;

use crate::types::{GnssFix, ImuSample, SensorRecord};

/// Publishes each decoded record to the five output channels.
///
/// All views come out of the one decode pass that produced the record.
/// Sends are fire-and-forget: a channel whose receivers are gone simply
/// drops the value — sink availability is the subscriber's concern, never
/// the pipeline's.
pub(crate) struct Dispatcher {
    records: watch::Sender<Option<Arc<SensorRecord>>>,
    fixes: watch::Sender<Option<Arc<GnssFix>>>,
    imu_samples: watch::Sender<Option<Arc<ImuSample>>>,
    headings: watch::Sender<Option<f64>>,
    velocities: watch::Sender<Option<f64>>,
    gnss_frame: Arc<str>,
    imu_frame: Arc<str>,
}

impl Dispatcher {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        records: watch::Sender<Option<Arc<SensorRecord>>>,
        fixes: watch::Sender<Option<Arc<GnssFix>>>,
        imu_samples: watch::Sender<Option<Arc<ImuSample>>>,
        headings: watch::Sender<Option<f64>>,
        velocities: watch::Sender<Option<f64>>,
        gnss_frame: Arc<str>,
        imu_frame: Arc<str>,
    ) -> Self {
        Self { records, fixes, imu_samples, headings, velocities, gnss_frame, imu_frame }
    }

    /// Publish one record and its derived views, in channel order:
    /// full record, fix, IMU, heading, velocity. Each channel sees the
    /// record at most once per received datagram.
    pub(crate) fn dispatch(&self, record: Arc<SensorRecord>) {
        let fix = record.gnss_fix(&self.gnss_frame);
        let imu = record.imu_sample(&self.imu_frame);
        let heading = record.heading;
        let velocity = record.velocity;

        let _ = self.records.send(Some(record));
        let _ = self.fixes.send(Some(Arc::new(fix)));
        let _ = self.imu_samples.send(Some(Arc::new(imu)));
        let _ = self.headings.send(Some(heading));
        let _ = self.velocities.send(Some(velocity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet;
    use crate::test_utils::PacketBuilder;
    use crate::types::Timestamp;

    fn dispatcher_with_receivers() -> (
        Dispatcher,
        watch::Receiver<Option<Arc<SensorRecord>>>,
        watch::Receiver<Option<Arc<GnssFix>>>,
        watch::Receiver<Option<Arc<ImuSample>>>,
        watch::Receiver<Option<f64>>,
        watch::Receiver<Option<f64>>,
    ) {
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
            Arc::from("gnss_link"),
            Arc::from("imu_link"),
        );
        (dispatcher, record_rx, fix_rx, imu_rx, heading_rx, velocity_rx)
    }

    fn sample_record() -> Arc<SensorRecord> {
        let bytes = PacketBuilder::new()
            .latitude_deg(48.0)
            .heading_deg(182.5)
            .velocity_ms(10.5)
            .build();
        let mut record = packet::decode(packet::validate(&bytes).unwrap());
        record.stamp(Timestamp::new(1_700_000_000, 0));
        Arc::new(record)
    }

    #[tokio::test]
    async fn every_sink_sees_one_record_per_dispatch() {
        let (dispatcher, mut records, mut fixes, mut imu, mut headings, mut velocities) =
            dispatcher_with_receivers();

        dispatcher.dispatch(sample_record());

        records.changed().await.unwrap();
        let record = records.borrow_and_update().clone().unwrap();
        assert_eq!(record.latitude, 48.0);

        fixes.changed().await.unwrap();
        let fix = fixes.borrow_and_update().clone().unwrap();
        assert_eq!(fix.latitude, 48.0);
        assert_eq!(&*fix.frame_id, "gnss_link");

        imu.changed().await.unwrap();
        assert_eq!(&*imu.borrow_and_update().clone().unwrap().frame_id, "imu_link");

        headings.changed().await.unwrap();
        assert_eq!(headings.borrow_and_update().unwrap(), 182.5);

        velocities.changed().await.unwrap();
        assert_eq!(velocities.borrow_and_update().unwrap(), 10.5);
    }

    #[tokio::test]
    async fn repeated_dispatch_notifies_independently() {
        let (dispatcher, mut records, _fixes, _imu, _headings, _velocities) =
            dispatcher_with_receivers();
        let record = sample_record();

        dispatcher.dispatch(Arc::clone(&record));
        records.changed().await.unwrap();
        records.borrow_and_update();

        // Same record again: a second, independent delivery attempt.
        dispatcher.dispatch(record);
        records.changed().await.unwrap();
        assert!(records.borrow_and_update().is_some());
    }

    #[tokio::test]
    async fn dropped_subscribers_are_silently_skipped() {
        let (dispatcher, records, fixes, imu, headings, velocities) = dispatcher_with_receivers();
        drop((records, fixes, imu, headings, velocities));

        // Must not panic or error with every receiver gone.
        dispatcher.dispatch(sample_record());
    }
}
