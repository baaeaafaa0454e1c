//! Command Dispatcher
//!
//! Answers each completed frame with exactly one ACK or NAK. Acquisition
//! only ever follows an ACK, and the reading bytes only ever follow the
//! ACK of the same frame.

use crate::error::NodeError;
use crate::slot::FrameSlot;
use crate::transmit::Transmitter;
use thermo_acquisition::{AcquisitionEngine, AdcDriver};
use thermo_protocol::wire::{ACK, NAK};
use thermo_protocol::{encode_reading, Channel, EncodedReading, Frame};
use tokio::io::AsyncWrite;
use tracing::{debug, error, info};

/// Result of one dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command recognized and reading sent
    Acknowledged {
        channel: Channel,
        average: u16,
        reading: EncodedReading,
    },
    /// Payload not recognized; NAK sent
    Rejected,
}

/// Foreground dispatcher owning the transmit half and the acquisition engine
pub struct Dispatcher<W, D> {
    tx: Transmitter<W>,
    engine: AcquisitionEngine<D>,
    dispatched: u64,
}

impl<W, D> Dispatcher<W, D>
where
    W: AsyncWrite + Unpin,
    D: AdcDriver,
{
    /// Create a dispatcher
    pub fn new(tx: Transmitter<W>, engine: AcquisitionEngine<D>) -> Self {
        Self {
            tx,
            engine,
            dispatched: 0,
        }
    }

    /// Run one dispatch cycle for a completed frame
    pub async fn dispatch(&mut self, frame: &Frame) -> Result<Outcome, NodeError> {
        self.dispatched += 1;

        let Some(channel) = Channel::from_payload(frame.payload()) else {
            debug!("Unrecognized payload {:02X?}", frame.payload());
            metrics::counter!("thermo_naks_total").increment(1);
            self.tx.send_byte(NAK).await?;
            return Ok(Outcome::Rejected);
        };

        self.tx.send_byte(ACK).await?;
        metrics::counter!("thermo_acks_total", "channel" => channel.label()).increment(1);

        let average = match self.engine.acquire(channel).await {
            Ok(batch) => batch.average(),
            Err(e) => {
                metrics::counter!("thermo_acquisition_failures_total", "channel" => channel.label())
                    .increment(1);
                return Err(e.into());
            }
        };

        let reading = encode_reading(average);
        self.tx.send(&reading).await?;
        metrics::histogram!("thermo_reading_counts", "channel" => channel.label())
            .record(f64::from(average));

        info!(
            "{} reading {} ({:?})",
            channel,
            average,
            String::from_utf8_lossy(&reading)
        );

        Ok(Outcome::Acknowledged {
            channel,
            average,
            reading,
        })
    }

    /// Dispatch frames from the slot until it closes
    pub async fn run(&mut self, slot: &FrameSlot) {
        info!("Starting command dispatcher");

        while let Some(frame) = slot.take().await {
            match self.dispatch(&frame).await {
                Ok(_) => {}
                Err(e) => error!("Dispatch failed: {}", e),
            }
        }

        info!("Command dispatcher stopped after {} frames", self.dispatched);
    }

    /// Frames dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}
