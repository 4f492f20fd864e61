//! Download measurement data model

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bytes received and the time it took to receive them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl Measurement {
    pub fn new(bytes: u64, elapsed: Duration) -> Self {
        Self { bytes, elapsed }
    }

    /// Fixed values reported by a dry run
    pub fn dry_run() -> Self {
        Self::new(crate::defaults::DRY_RUN_BYTES, crate::defaults::DRY_RUN_DURATION)
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Throughput in megabits per second (SI, 10^6 bits).
    ///
    /// A zero duration yields infinity.
    pub fn bandwidth_mbps(&self) -> f64 {
        (self.bytes as f64 * 8.0 / self.seconds()) / 1e6
    }
}
