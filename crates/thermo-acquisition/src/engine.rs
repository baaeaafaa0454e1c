//! Acquisition Engine

use crate::adc::AdcDriver;
use crate::batch::SampleBatch;
use crate::error::AcquisitionError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thermo_protocol::Channel;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

/// Engine timing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Longest wait for the converter to go idle (ms)
    pub idle_timeout_ms: u64,
    /// Delay between busy polls (ms)
    pub poll_interval_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            idle_timeout_ms: 500,
            poll_interval_ms: 1,
        }
    }
}

/// Captures full batches from one channel at a time
pub struct AcquisitionEngine<D> {
    driver: D,
    batch: SampleBatch,
    settings: EngineSettings,
}

impl<D: AdcDriver> AcquisitionEngine<D> {
    /// Create an engine around a converter
    pub fn new(driver: D, settings: EngineSettings) -> Self {
        info!(
            "Creating acquisition engine: idle_timeout={}ms, poll={}ms",
            settings.idle_timeout_ms, settings.poll_interval_ms
        );
        Self {
            driver,
            batch: SampleBatch::new(),
            settings,
        }
    }

    /// Capture a fresh batch from `channel`.
    ///
    /// The previous batch is overwritten. On error no batch is returned, so
    /// a partial capture is never observed.
    pub async fn acquire(&mut self, channel: Channel) -> Result<&SampleBatch, AcquisitionError> {
        self.wait_idle().await?;
        self.driver.configure(channel)?;
        self.wait_idle().await?;

        self.batch.begin(channel);
        for slot in self.batch.slots_mut().iter_mut() {
            *slot = self.driver.convert()?;
        }
        self.batch.complete();

        debug!(
            "Batch {} on {}: min={} max={} avg={}",
            self.batch.sequence(),
            channel,
            self.batch.min(),
            self.batch.max(),
            self.batch.average()
        );
        Ok(&self.batch)
    }

    /// Access the converter
    pub fn driver(&self) -> &D {
        &self.driver
    }

    async fn wait_idle(&mut self) -> Result<(), AcquisitionError> {
        let limit = Duration::from_millis(self.settings.idle_timeout_ms);
        let poll = Duration::from_millis(self.settings.poll_interval_ms.max(1));
        let driver = &mut self.driver;

        let idle = async move {
            while driver.is_busy() {
                sleep(poll).await;
            }
        };

        timeout(limit, idle)
            .await
            .map_err(|_| AcquisitionError::AdcBusy(self.settings.idle_timeout_ms))
    }
}
