//! Serial Link Settings

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::info;

/// Default link rate of the node
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Point-to-point serial link settings (8N1, no flow control)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Serial port device path (e.g., "/dev/ttyUSB0" or "COM3")
    pub device: String,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB0".to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl LinkSettings {
    /// Create settings for a device at the default rate
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
            ..Default::default()
        }
    }

    /// Open the serial port as an async stream
    pub fn open(&self) -> Result<SerialStream, ProtocolError> {
        info!("Opening {} at {} baud", self.device, self.baud_rate);

        let stream = tokio_serial::new(&self.device, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open_native_async()?;

        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = LinkSettings::default();
        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.device, "/dev/ttyUSB0");
    }

    #[test]
    fn test_new_keeps_default_rate() {
        let settings = LinkSettings::new("COM3");
        assert_eq!(settings.device, "COM3");
        assert_eq!(settings.baud_rate, DEFAULT_BAUD_RATE);
    }
}
