//! Acquisition Error Types

use thermo_protocol::Channel;
use thiserror::Error;

/// Errors during acquisition
#[derive(Debug, Clone, Error)]
pub enum AcquisitionError {
    /// Converter stayed busy past the idle timeout
    #[error("Converter still busy after {0}ms")]
    AdcBusy(u64),

    /// Converter rejected the channel setup
    #[error("Channel {0} could not be configured: {1}")]
    Configure(Channel, String),

    /// A single conversion failed
    #[error("Conversion failed: {0}")]
    Conversion(String),
}
