//! Protocol Error Types

use thiserror::Error;

/// Errors that can occur on the thermocouple link
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Serial port connection error
    #[error("Serial port error: {0}")]
    SerialError(String),

    /// Timeout waiting for the node
    #[error("Timeout waiting for node response after {0}ms")]
    Timeout(u64),

    /// Node answered with NAK
    #[error("Node rejected command {0:?}")]
    Rejected(String),

    /// Handshake byte was neither ACK nor NAK
    #[error("Unexpected handshake byte {0:02X}")]
    UnexpectedHandshake(u8),

    /// Reading bytes could not be decoded
    #[error("Invalid reading: {0}")]
    InvalidReading(String),

    /// Payload does not fit in a frame
    #[error("Payload of {0} bytes contains a delimiter or exceeds the frame")]
    InvalidPayload(usize),

    /// Link closed by the other side
    #[error("Serial link closed")]
    LinkClosed,
}

impl From<std::io::Error> for ProtocolError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ProtocolError::LinkClosed,
            _ => ProtocolError::SerialError(err.to_string()),
        }
    }
}

impl From<tokio_serial::Error> for ProtocolError {
    fn from(err: tokio_serial::Error) -> Self {
        ProtocolError::SerialError(err.to_string())
    }
}
