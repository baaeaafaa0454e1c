//! Thermocouple Acquisition
//!
//! Drives repeated conversions on one channel into a fixed-size batch and
//! reduces the batch to a single averaged value.

mod adc;
mod batch;
mod engine;
mod error;

pub use adc::{AdcDriver, SimulatedAdc, SimulatedAdcConfig};
pub use batch::{average, SampleBatch};
pub use engine::{AcquisitionEngine, EngineSettings};
pub use error::AcquisitionError;

/// Samples taken per acquisition request
pub const BATCH_LEN: usize = 20;

/// One raw converter count
pub type Sample = u16;
