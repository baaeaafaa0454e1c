//! Single-slot frame handoff between the receive task and the dispatcher

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use thermo_protocol::Frame;
use tokio::sync::Notify;

/// Holds at most one completed frame.
///
/// The receive path publishes, the dispatcher takes. Publishing while a
/// frame is still pending replaces it; there is no queue.
#[derive(Debug, Default)]
pub struct FrameSlot {
    pending: Mutex<Option<Frame>>,
    notify: Notify,
    closed: AtomicBool,
    replaced: AtomicU64,
}

impl FrameSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a completed frame. Returns true if a pending frame was lost.
    pub fn publish(&self, frame: Frame) -> bool {
        let lost = self.lock().replace(frame).is_some();
        if lost {
            self.replaced.fetch_add(1, Ordering::Relaxed);
        }
        self.notify.notify_one();
        lost
    }

    /// Take the pending frame without waiting
    pub fn try_take(&self) -> Option<Frame> {
        self.lock().take()
    }

    /// Wait for the next frame. Returns `None` once the slot is closed and
    /// drained.
    pub async fn take(&self) -> Option<Frame> {
        loop {
            if let Some(frame) = self.try_take() {
                return Some(frame);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            self.notify.notified().await;
        }
    }

    /// Stop accepting waits; a pending frame can still be taken
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_one();
    }

    /// Check if the receive side has closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Frames replaced before the dispatcher took them
    pub fn replaced(&self) -> u64 {
        self.replaced.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Frame>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
