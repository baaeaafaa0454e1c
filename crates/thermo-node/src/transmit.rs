//! Byte Transmitter
//!
//! Sends one byte at a time and waits for the writer to accept it before
//! the next, bounded by a timeout.

use crate::error::NodeError;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::trace;

/// Transmit half of the serial link
pub struct Transmitter<W> {
    writer: W,
    timeout: Duration,
    sent: u64,
}

impl<W: AsyncWrite + Unpin> Transmitter<W> {
    /// Wrap a writer with a per-byte accept timeout
    pub fn new(writer: W, timeout: Duration) -> Self {
        Self {
            writer,
            timeout,
            sent: 0,
        }
    }

    /// Send a single byte
    pub async fn send_byte(&mut self, byte: u8) -> Result<(), NodeError> {
        let limit_ms = self.timeout.as_millis() as u64;
        let writer = &mut self.writer;

        let write = async move {
            writer.write_all(&[byte]).await?;
            writer.flush().await
        };

        timeout(self.timeout, write)
            .await
            .map_err(|_| NodeError::TransmitTimeout(limit_ms))??;

        self.sent += 1;
        trace!("Sent {:02X}", byte);
        Ok(())
    }

    /// Send bytes in order
    pub async fn send(&mut self, bytes: &[u8]) -> Result<(), NodeError> {
        for &byte in bytes {
            self.send_byte(byte).await?;
        }
        Ok(())
    }

    /// Total bytes sent
    pub fn sent(&self) -> u64 {
        self.sent
    }
}
