//! Receive path: serial bytes into published frames

use crate::error::NodeError;
use crate::slot::FrameSlot;
use std::sync::Arc;
use thermo_protocol::FrameAssembler;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

/// Feed every received byte through a frame assembler and publish completed
/// frames until the link closes. The slot is closed on exit.
pub async fn receive_frames<R>(mut reader: R, slot: Arc<FrameSlot>) -> Result<(), NodeError>
where
    R: AsyncRead + Unpin,
{
    let mut assembler = FrameAssembler::new();
    let mut buf = [0u8; 64];

    let result = loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                info!("Serial link closed by peer");
                break Ok(());
            }
            Ok(n) => n,
            Err(e) => break Err(NodeError::from(e)),
        };

        for &byte in &buf[..n] {
            if let Some(frame) = assembler.push(byte) {
                debug!("Frame received: {:02X?}", frame.payload());
                metrics::counter!("thermo_frames_received_total").increment(1);
                if slot.publish(frame) {
                    warn!("Pending frame replaced before dispatch");
                    metrics::counter!("thermo_frames_replaced_total").increment(1);
                }
            }
        }
    };

    if assembler.overwritten() > 0 {
        debug!("{} payload bytes overwritten by overlong frames", assembler.overwritten());
    }
    slot.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermo_protocol::wire::{END_BYTE, START_BYTE};
    use tokio::io::{duplex, AsyncWriteExt};

    #[tokio::test]
    async fn test_frames_published_and_slot_closed() {
        let (mut far, near) = duplex(64);
        let slot = Arc::new(FrameSlot::new());
        let task = tokio::spawn(receive_frames(near, slot.clone()));

        far.write_all(&[0xFF, START_BYTE, b'?', b'T', b'2', END_BYTE]).await.unwrap();
        let frame = slot.take().await.unwrap();
        assert_eq!(frame.payload(), b"?T2");

        drop(far);
        task.await.unwrap().unwrap();
        assert!(slot.take().await.is_none());
    }

    #[tokio::test]
    async fn test_frame_split_across_reads() {
        let (mut far, near) = duplex(64);
        let slot = Arc::new(FrameSlot::new());
        let task = tokio::spawn(receive_frames(near, slot.clone()));

        far.write_all(&[START_BYTE, b'?']).await.unwrap();
        tokio::task::yield_now().await;
        far.write_all(&[b'T', b'3', END_BYTE]).await.unwrap();
        drop(far);

        task.await.unwrap().unwrap();
        assert_eq!(slot.take().await.unwrap().payload(), b"?T3");
    }
}
