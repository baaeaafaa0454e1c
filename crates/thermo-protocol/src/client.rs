//! Base Station Client
//!
//! Frames commands for a node and decodes its replies.

use crate::adc::{FULL_SCALE, REFERENCE_MV};
use crate::command::Channel;
use crate::encoding::{decode_reading, EncodedReading, READING_WIDTH};
use crate::error::ProtocolError;
use crate::link::LinkSettings;
use crate::wire::{ACK, END_BYTE, NAK, START_BYTE};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_serial::SerialStream;
use tracing::{debug, info, warn};

/// Default timeout for a node reply
const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Reply to a framed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// ACK followed by an encoded reading
    Accepted(EncodedReading),
    /// NAK
    Rejected,
}

/// Decoded thermocouple reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Channel that was sampled
    pub channel: Channel,
    /// Averaged raw converter counts
    pub raw: u16,
    /// Bytes as received
    pub encoded: EncodedReading,
}

impl Reading {
    /// Decode a reading received for `channel`
    pub fn decode(channel: Channel, encoded: EncodedReading) -> Result<Self, ProtocolError> {
        let raw = decode_reading(&encoded)?;
        Ok(Self {
            channel,
            raw,
            encoded,
        })
    }

    /// Thermocouple voltage at the converter input (millivolts)
    pub fn millivolts(&self) -> f64 {
        f64::from(self.raw) * f64::from(REFERENCE_MV) / f64::from(FULL_SCALE)
    }
}

/// Client for a thermocouple node
pub struct StationClient<T> {
    transport: T,
    timeout: Duration,
}

impl StationClient<SerialStream> {
    /// Open a client on a serial port
    pub fn open(settings: &LinkSettings) -> Result<Self, ProtocolError> {
        Ok(Self::new(settings.open()?))
    }
}

impl<T> StationClient<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a client over any byte transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Set reply timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Request a reading from a channel
    pub async fn query(&mut self, channel: Channel) -> Result<Reading, ProtocolError> {
        info!("Querying thermocouple {}", channel);

        match self.send_payload(channel.command()).await? {
            Reply::Accepted(encoded) => Reading::decode(channel, encoded),
            Reply::Rejected => Err(ProtocolError::Rejected(
                String::from_utf8_lossy(channel.command()).into_owned(),
            )),
        }
    }

    /// Send an arbitrary payload inside a frame and collect the reply.
    ///
    /// The payload may not contain the end delimiter.
    pub async fn send_payload(&mut self, payload: &[u8]) -> Result<Reply, ProtocolError> {
        if payload.contains(&END_BYTE) {
            return Err(ProtocolError::InvalidPayload(payload.len()));
        }

        let mut frame = Vec::with_capacity(payload.len() + 2);
        frame.push(START_BYTE);
        frame.extend_from_slice(payload);
        frame.push(END_BYTE);

        debug!("Sending frame {:02X?}", frame);
        self.transport.write_all(&frame).await?;
        self.transport.flush().await?;

        let mut handshake = [0u8; 1];
        self.read_exact(&mut handshake).await?;

        match handshake[0] {
            ACK => {
                let mut encoded = [0u8; READING_WIDTH];
                self.read_exact(&mut encoded).await?;
                debug!("Reading bytes {:?}", String::from_utf8_lossy(&encoded));
                Ok(Reply::Accepted(encoded))
            }
            NAK => {
                warn!("Node rejected payload {:02X?}", payload);
                Ok(Reply::Rejected)
            }
            other => Err(ProtocolError::UnexpectedHandshake(other)),
        }
    }

    /// Give back the underlying transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ProtocolError> {
        match tokio::time::timeout(self.timeout, self.transport.read_exact(buf)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(ProtocolError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    /// Reply to one frame with the given bytes
    async fn fake_node(mut port: tokio::io::DuplexStream, reply: Vec<u8>) -> Vec<u8> {
        let mut received = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            port.read_exact(&mut byte).await.unwrap();
            received.push(byte[0]);
            if byte[0] == END_BYTE {
                break;
            }
        }
        port.write_all(&reply).await.unwrap();
        received
    }

    #[tokio::test]
    async fn test_query_decodes_reading() {
        let (client_end, node_end) = duplex(64);
        let node = tokio::spawn(fake_node(node_end, vec![ACK, b' ', b'3', b'0', b'5']));

        let mut client = StationClient::new(client_end);
        let reading = client.query(Channel::B).await.unwrap();
        assert_eq!(reading.raw, 305);
        assert_eq!(reading.channel, Channel::B);
        assert_eq!(&reading.encoded, b" 305");

        let sent = node.await.unwrap();
        assert_eq!(sent, vec![START_BYTE, b'?', b'T', b'2', END_BYTE]);
    }

    #[tokio::test]
    async fn test_nak_is_rejected() {
        let (client_end, node_end) = duplex(64);
        tokio::spawn(fake_node(node_end, vec![NAK]));

        let mut client = StationClient::new(client_end);
        let reply = client.send_payload(b"XYZ").await.unwrap();
        assert_eq!(reply, Reply::Rejected);
    }

    #[tokio::test]
    async fn test_unexpected_handshake() {
        let (client_end, node_end) = duplex(64);
        tokio::spawn(fake_node(node_end, vec![0x42]));

        let mut client = StationClient::new(client_end);
        let result = client.query(Channel::A).await;
        assert!(matches!(result, Err(ProtocolError::UnexpectedHandshake(0x42))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_node_times_out() {
        let (client_end, _node_end) = duplex(64);
        let mut client = StationClient::new(client_end);
        client.set_timeout(Duration::from_millis(50));

        let result = client.query(Channel::C).await;
        assert!(matches!(result, Err(ProtocolError::Timeout(50))));
    }

    #[tokio::test]
    async fn test_payload_with_end_byte_refused() {
        let (client_end, _node_end) = duplex(64);
        let mut client = StationClient::new(client_end);
        let result = client.send_payload(&[b'?', END_BYTE]).await;
        assert!(matches!(result, Err(ProtocolError::InvalidPayload(2))));
    }

    #[test]
    fn test_millivolts_at_full_scale() {
        let reading = Reading::decode(Channel::A, *b"1023").unwrap();
        assert!((reading.millivolts() - 1500.0).abs() < 0.01);
    }
}
