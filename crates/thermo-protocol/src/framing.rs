//! Frame Assembler
//!
//! Turns an arbitrary byte stream into delimited command frames, one byte at
//! a time. Malformed input never raises an error: at worst it produces a
//! garbage frame that the dispatcher rejects.

use crate::wire::{END_BYTE, START_BYTE};
use tracing::trace;

/// Payload capacity of a frame
pub const FRAME_CAPACITY: usize = 3;

/// Framing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramingState {
    /// Waiting for a start delimiter
    #[default]
    Idle,
    /// Accumulating payload until an end delimiter
    InFrame,
}

/// Payload of a completed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    bytes: [u8; FRAME_CAPACITY],
    len: usize,
}

impl Frame {
    /// Build a frame from a payload, applying the overwrite policy
    pub fn from_payload(payload: &[u8]) -> Self {
        let mut assembler = FrameAssembler::new();
        assembler.begin();
        for &byte in payload {
            assembler.store(byte);
        }
        assembler.frame
    }

    /// Active payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of active payload bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the frame carried no payload
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Byte-at-a-time frame assembler
#[derive(Debug, Default)]
pub struct FrameAssembler {
    state: FramingState,
    frame: Frame,
    cursor: usize,
    /// Total payload bytes lost to the overwrite policy
    overwritten: u64,
}

impl FrameAssembler {
    /// Create an idle assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one received byte.
    ///
    /// Returns the completed frame when `byte` closes one. A start byte seen
    /// inside a frame is ordinary payload.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        match (self.state, byte) {
            (FramingState::Idle, START_BYTE) => {
                self.begin();
                None
            }
            (FramingState::Idle, _) => {
                trace!("Discarding {:02X} outside a frame", byte);
                None
            }
            (FramingState::InFrame, END_BYTE) => {
                self.state = FramingState::Idle;
                trace!("Frame closed with {} payload bytes", self.frame.len);
                Some(self.frame)
            }
            (FramingState::InFrame, _) => {
                self.store(byte);
                None
            }
        }
    }

    /// Current framing state
    pub fn state(&self) -> FramingState {
        self.state
    }

    /// Payload bytes overwritten by overlong frames so far
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }

    fn begin(&mut self) {
        self.state = FramingState::InFrame;
        self.frame = Frame::default();
        self.cursor = 0;
    }

    fn store(&mut self, byte: u8) {
        if self.cursor == FRAME_CAPACITY {
            self.cursor = 0;
        }
        if self.frame.len == FRAME_CAPACITY {
            self.overwritten += 1;
        }
        self.frame.bytes[self.cursor] = byte;
        self.cursor += 1;
        self.frame.len = self.frame.len.max(self.cursor);
    }
}
