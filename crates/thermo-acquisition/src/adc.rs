//! Converter Driver Interface
//!
//! The node only needs three things from the analog front end: select a
//! channel, report whether a conversion sequence is still running, and
//! convert one sample.

use crate::error::AcquisitionError;
use crate::Sample;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thermo_protocol::adc::FULL_SCALE;
use thermo_protocol::Channel;
use tracing::debug;

/// Analog-to-digital converter used by the acquisition engine
pub trait AdcDriver: Send {
    /// Select a channel with the fixed internal reference
    fn configure(&mut self, channel: Channel) -> Result<(), AcquisitionError>;

    /// Check if a previous conversion sequence is still running
    fn is_busy(&mut self) -> bool;

    /// Run one conversion on the selected channel
    fn convert(&mut self) -> Result<Sample, AcquisitionError>;
}

/// Settings for the simulated converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedAdcConfig {
    /// Mean level on thermocouple 1 (counts)
    pub channel_a: Sample,
    /// Mean level on thermocouple 2 (counts)
    pub channel_b: Sample,
    /// Mean level on thermocouple 3 (counts)
    pub channel_c: Sample,
    /// Peak deviation around the mean level (counts)
    pub jitter: Sample,
    /// Busy polls reported after each channel change
    pub settle_polls: u32,
}

impl Default for SimulatedAdcConfig {
    fn default() -> Self {
        Self {
            channel_a: 512,
            channel_b: 305,
            channel_c: 98,
            jitter: 4,
            settle_polls: 0,
        }
    }
}

impl SimulatedAdcConfig {
    fn level(&self, channel: Channel) -> Sample {
        match channel {
            Channel::A => self.channel_a,
            Channel::B => self.channel_b,
            Channel::C => self.channel_c,
        }
    }
}

/// Deterministic stand-in for the node's converter
pub struct SimulatedAdc {
    config: SimulatedAdcConfig,
    selected: Option<Channel>,
    conversions: u64,
    settling: u32,
}

impl SimulatedAdc {
    /// Create a simulated converter
    pub fn new(config: SimulatedAdcConfig) -> Self {
        Self {
            config,
            selected: None,
            conversions: 0,
            settling: 0,
        }
    }

    /// Total conversions performed
    pub fn conversions(&self) -> u64 {
        self.conversions
    }
}

impl AdcDriver for SimulatedAdc {
    fn configure(&mut self, channel: Channel) -> Result<(), AcquisitionError> {
        debug!(
            "Simulated converter on input {} ({})",
            channel.analog_input(),
            channel
        );
        self.selected = Some(channel);
        self.settling = self.config.settle_polls;
        Ok(())
    }

    fn is_busy(&mut self) -> bool {
        if self.settling > 0 {
            self.settling -= 1;
            return true;
        }
        false
    }

    fn convert(&mut self) -> Result<Sample, AcquisitionError> {
        let channel = self
            .selected
            .ok_or_else(|| AcquisitionError::Conversion("no channel selected".to_string()))?;

        let level = i32::from(self.config.level(channel));
        let jitter = i32::from(self.config.jitter);

        let offset = if jitter == 0 {
            0
        } else {
            let mut hasher = DefaultHasher::new();
            channel.hash(&mut hasher);
            self.conversions.hash(&mut hasher);
            (hasher.finish() % (2 * jitter as u64 + 1)) as i32 - jitter
        };

        self.conversions += 1;
        Ok((level + offset).clamp(0, i32::from(FULL_SCALE)) as Sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_requires_channel() {
        let mut adc = SimulatedAdc::new(SimulatedAdcConfig::default());
        assert!(adc.convert().is_err());
    }

    #[test]
    fn test_flat_level_without_jitter() {
        let mut adc = SimulatedAdc::new(SimulatedAdcConfig {
            jitter: 0,
            ..Default::default()
        });
        adc.configure(Channel::B).unwrap();
        for _ in 0..5 {
            assert_eq!(adc.convert().unwrap(), 305);
        }
        assert_eq!(adc.conversions(), 5);
    }

    #[test]
    fn test_jitter_stays_in_band_and_range() {
        let mut adc = SimulatedAdc::new(SimulatedAdcConfig {
            channel_a: 1022,
            jitter: 8,
            ..Default::default()
        });
        adc.configure(Channel::A).unwrap();
        for _ in 0..200 {
            let sample = adc.convert().unwrap();
            assert!((1014..=FULL_SCALE).contains(&sample));
        }
    }

    #[test]
    fn test_settling_reports_busy() {
        let mut adc = SimulatedAdc::new(SimulatedAdcConfig {
            settle_polls: 2,
            ..Default::default()
        });
        adc.configure(Channel::C).unwrap();
        assert!(adc.is_busy());
        assert!(adc.is_busy());
        assert!(!adc.is_busy());
    }
}
