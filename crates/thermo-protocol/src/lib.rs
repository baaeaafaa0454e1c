//! Thermocouple Link Protocol
//!
//! This crate provides the byte-level framing, the command table, and the
//! reading encoder for the serial link between a base station and a
//! thermocouple node, plus an async client for the base-station side.

mod client;
mod command;
mod encoding;
mod error;
mod framing;
mod link;

pub use client::{Reading, Reply, StationClient};
pub use command::{Channel, COMMAND_TABLE};
pub use encoding::{decode_reading, encode_reading, to_bcd, EncodedReading, READING_WIDTH};
pub use error::ProtocolError;
pub use framing::{Frame, FrameAssembler, FramingState, FRAME_CAPACITY};
pub use link::{LinkSettings, DEFAULT_BAUD_RATE};

/// Wire control bytes
pub mod wire {
    /// Start of frame (ASCII SOH)
    pub const START_BYTE: u8 = 0x01;
    /// End of frame (ASCII EOT)
    pub const END_BYTE: u8 = 0x04;
    /// Command recognized (ASCII ACK)
    pub const ACK: u8 = 0x06;
    /// Command not recognized (ASCII NAK)
    pub const NAK: u8 = 0x15;
}

/// Converter characteristics of the node
pub mod adc {
    /// Converter resolution in bits
    pub const RESOLUTION_BITS: u32 = 10;
    /// Largest raw count the converter produces
    pub const FULL_SCALE: u16 = (1 << RESOLUTION_BITS) - 1;
    /// Internal reference voltage (millivolts)
    pub const REFERENCE_MV: u32 = 1500;
}
