//! Raw Sample Batch

use crate::{Sample, BATCH_LEN};
use thermo_protocol::Channel;

/// Floor of the integer mean of a full batch.
///
/// The sum is kept in 32 bits, which holds 20 samples of any 16-bit value.
pub fn average(samples: &[Sample; BATCH_LEN]) -> Sample {
    let sum: u32 = samples.iter().map(|&s| u32::from(s)).sum();
    (sum / BATCH_LEN as u32) as Sample
}

/// Fixed-size batch of samples from one channel
#[derive(Debug, Clone)]
pub struct SampleBatch {
    samples: [Sample; BATCH_LEN],
    channel: Option<Channel>,
    /// Completed acquisitions written into this batch
    sequence: u64,
}

impl SampleBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self {
            samples: [0; BATCH_LEN],
            channel: None,
            sequence: 0,
        }
    }

    /// Create a complete batch from known samples
    pub fn from_samples(channel: Channel, samples: [Sample; BATCH_LEN]) -> Self {
        Self {
            samples,
            channel: Some(channel),
            sequence: 1,
        }
    }

    /// Samples of the last completed acquisition
    pub fn samples(&self) -> &[Sample; BATCH_LEN] {
        &self.samples
    }

    /// Channel the samples came from
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    /// Number of acquisitions completed into this batch
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Averaged value of the batch
    pub fn average(&self) -> Sample {
        average(&self.samples)
    }

    /// Smallest sample
    pub fn min(&self) -> Sample {
        self.samples.iter().copied().min().unwrap_or(0)
    }

    /// Largest sample
    pub fn max(&self) -> Sample {
        self.samples.iter().copied().max().unwrap_or(0)
    }

    pub(crate) fn begin(&mut self, channel: Channel) {
        self.samples = [0; BATCH_LEN];
        self.channel = Some(channel);
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Sample; BATCH_LEN] {
        &mut self.samples
    }

    pub(crate) fn complete(&mut self) {
        self.sequence += 1;
    }
}

impl Default for SampleBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_average_truncates() {
        // 19 * 10 + 11 = 201, mean 10.05
        let mut samples = [10; BATCH_LEN];
        samples[0] = 11;
        assert_eq!(average(&samples), 10);
    }

    #[test]
    fn test_average_does_not_round_up() {
        // sum 219, mean 10.95
        let mut samples = [10; BATCH_LEN];
        for s in samples.iter_mut().take(19) {
            *s = 11;
        }
        assert_eq!(samples.iter().map(|&s| s as u32).sum::<u32>(), 219);
        assert_eq!(average(&samples), 10);
    }

    #[test]
    fn test_average_full_scale() {
        assert_eq!(average(&[1023; BATCH_LEN]), 1023);
        assert_eq!(average(&[u16::MAX; BATCH_LEN]), u16::MAX);
    }

    #[test]
    fn test_batch_stats() {
        let mut samples = [500; BATCH_LEN];
        samples[3] = 480;
        samples[7] = 530;
        let batch = SampleBatch::from_samples(Channel::A, samples);
        assert_eq!(batch.min(), 480);
        assert_eq!(batch.max(), 530);
        assert_eq!(batch.channel(), Some(Channel::A));
    }

    proptest! {
        #[test]
        fn prop_average_is_floor_mean(samples in prop::array::uniform20(0u16..=1023)) {
            let sum: u32 = samples.iter().map(|&s| s as u32).sum();
            let avg = average(&samples) as u32;
            prop_assert!(avg * 20 <= sum);
            prop_assert!(sum < (avg + 1) * 20);
        }
    }
}
