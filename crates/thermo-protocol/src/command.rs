//! Command Table and Channel Definitions
//!
//! Each recognized command literal selects exactly one thermocouple channel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Thermocouple channels wired to the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    /// Thermocouple 1, analog input 7
    A = 7,
    /// Thermocouple 2, analog input 6
    B = 6,
    /// Thermocouple 3, analog input 5
    C = 5,
}

/// Recognized payloads in match order
pub const COMMAND_TABLE: [(&[u8; 3], Channel); 3] = [
    (b"?T1", Channel::A),
    (b"?T2", Channel::B),
    (b"?T3", Channel::C),
];

impl Channel {
    /// All channels in table order
    pub const ALL: [Channel; 3] = [Channel::A, Channel::B, Channel::C];

    /// Look up the channel selected by a frame payload.
    ///
    /// Only an exact, full-length, case-sensitive match counts: no prefix
    /// match and no tolerance for trailing bytes.
    pub fn from_payload(payload: &[u8]) -> Option<Channel> {
        COMMAND_TABLE
            .iter()
            .find(|(literal, _)| literal.as_slice() == payload)
            .map(|(_, channel)| *channel)
    }

    /// Command literal that selects this channel
    pub fn command(&self) -> &'static [u8; 3] {
        match self {
            Channel::A => b"?T1",
            Channel::B => b"?T2",
            Channel::C => b"?T3",
        }
    }

    /// Analog input number on the converter
    pub fn analog_input(&self) -> u8 {
        *self as u8
    }

    /// Short label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Channel::A => "A",
            Channel::B => "B",
            Channel::C => "C",
        }
    }

    /// Parse a thermocouple number (1, 2 or 3) as given by an operator
    pub fn from_number(number: u8) -> Option<Channel> {
        match number {
            1 => Some(Channel::A),
            2 => Some(Channel::B),
            3 => Some(Channel::C),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_payloads() {
        assert_eq!(Channel::from_payload(b"?T1"), Some(Channel::A));
        assert_eq!(Channel::from_payload(b"?T2"), Some(Channel::B));
        assert_eq!(Channel::from_payload(b"?T3"), Some(Channel::C));
    }

    #[test]
    fn test_no_partial_or_case_insensitive_match() {
        assert_eq!(Channel::from_payload(b""), None);
        assert_eq!(Channel::from_payload(b"?T"), None);
        assert_eq!(Channel::from_payload(b"?t1"), None);
        assert_eq!(Channel::from_payload(b"?T1 "), None);
        assert_eq!(Channel::from_payload(b"?T4"), None);
        assert_eq!(Channel::from_payload(b"XYZ"), None);
    }

    #[test]
    fn test_table_and_command_agree() {
        for (literal, channel) in COMMAND_TABLE {
            assert_eq!(channel.command(), literal);
            assert_eq!(Channel::from_payload(channel.command()), Some(channel));
        }
    }

    #[test]
    fn test_analog_inputs() {
        assert_eq!(Channel::A.analog_input(), 7);
        assert_eq!(Channel::B.analog_input(), 6);
        assert_eq!(Channel::C.analog_input(), 5);
    }
}
