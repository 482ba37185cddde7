//! Driver configuration.
//!
//! Carries the same parameter set the ADMA unit is provisioned against:
//! the bind address and port the device broadcasts to, the frame identifiers
//! stamped onto the GNSS and IMU views, and the latency-probe switch. The
//! wait timeout is configuration-visible so tests can run the ingestion loop
//! without real wall-clock waits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{AdmaError, Result};

fn default_destination_ip() -> String {
    "0.0.0.0".to_string()
}

fn default_destination_port() -> u16 {
    1040
}

fn default_gnss_frame() -> String {
    "gnss_link".to_string()
}

fn default_imu_frame() -> String {
    "imu_link".to_string()
}

fn default_wait_timeout_ms() -> u64 {
    1000
}

/// Configuration for an ADMA ingest driver.
///
/// All fields are immutable once the driver is spawned. Defaults match the
/// device's factory broadcast settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmaConfig {
    /// Local address the device broadcasts to. Default `"0.0.0.0"`.
    #[serde(default = "default_destination_ip")]
    pub destination_ip: String,

    /// Local UDP port. Default `1040`. Port `0` binds an OS-assigned
    /// ephemeral port (useful for tests; see
    /// [`AdmaConnection::local_addr`](crate::AdmaConnection::local_addr)).
    #[serde(default = "default_destination_port")]
    pub destination_port: u16,

    /// Enables the round-trip latency probe. Default `false`.
    #[serde(default)]
    pub use_performance_check: bool,

    /// Frame identifier attached to GNSS fix views. Default `"gnss_link"`.
    #[serde(default = "default_gnss_frame")]
    pub gnss_frame: String,

    /// Frame identifier attached to IMU sample views. Default `"imu_link"`.
    #[serde(default = "default_imu_frame")]
    pub imu_frame: String,

    /// Upper bound on one readiness wait, in milliseconds. Default `1000`.
    /// The ingestion loop re-checks cancellation and emits a liveness message
    /// at least this often while no data arrives.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
}

impl Default for AdmaConfig {
    fn default() -> Self {
        Self {
            destination_ip: default_destination_ip(),
            destination_port: default_destination_port(),
            use_performance_check: false,
            gnss_frame: default_gnss_frame(),
            imu_frame: default_imu_frame(),
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

impl AdmaConfig {
    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| AdmaError::Config { details: e.to_string() })
    }

    /// The readiness wait bound as a [`Duration`].
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// The `address:port` string the endpoint binds, for diagnostics.
    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.destination_ip, self.destination_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_factory_settings() {
        let config = AdmaConfig::default();
        assert_eq!(config.destination_ip, "0.0.0.0");
        assert_eq!(config.destination_port, 1040);
        assert!(!config.use_performance_check);
        assert_eq!(config.gnss_frame, "gnss_link");
        assert_eq!(config.imu_frame, "imu_link");
        assert_eq!(config.wait_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn yaml_overrides_merge_with_defaults() {
        let config = AdmaConfig::from_yaml(
            "destination_ip: \"192.168.88.15\"\nuse_performance_check: true\n",
        )
        .unwrap();
        assert_eq!(config.destination_ip, "192.168.88.15");
        assert!(config.use_performance_check);
        // Untouched fields keep their defaults
        assert_eq!(config.destination_port, 1040);
        assert_eq!(config.gnss_frame, "gnss_link");
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let error = AdmaConfig::from_yaml("destination_port: [not, a, port]").unwrap_err();
        assert!(matches!(error, AdmaError::Config { .. }));
        assert!(error.is_fatal());
    }

    #[test]
    fn bind_target_formats_address_and_port() {
        let config = AdmaConfig { destination_port: 2040, ..AdmaConfig::default() };
        assert_eq!(config.bind_target(), "0.0.0.0:2040");
    }
}
