//! Node Error Types

use thermo_acquisition::AcquisitionError;
use thermo_protocol::ProtocolError;
use thiserror::Error;

/// Errors raised while running a node
#[derive(Debug, Error)]
pub enum NodeError {
    /// Writer did not accept a byte in time
    #[error("Transmit not accepted within {0}ms")]
    TransmitTimeout(u64),

    /// Serial link read/write failure
    #[error("Serial link error: {0}")]
    Link(String),

    /// Protocol layer failure (port open, settings)
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Acquisition failed after the command was acknowledged
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging or metrics setup failed
    #[error("Telemetry setup failed: {0}")]
    Telemetry(String),
}

impl From<std::io::Error> for NodeError {
    fn from(err: std::io::Error) -> Self {
        NodeError::Link(err.to_string())
    }
}

impl From<config::ConfigError> for NodeError {
    fn from(err: config::ConfigError) -> Self {
        NodeError::Config(err.to_string())
    }
}
