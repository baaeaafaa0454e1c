//! Reading Encoder
//!
//! Fixed-width decimal ASCII with leading-zero suppression. Digits come from
//! a double-dabble binary-to-BCD conversion over the converter's 12-bit
//! input window, so values above 4095 wrap; the node never produces them.

use crate::error::ProtocolError;

/// Number of ASCII bytes in an encoded reading
pub const READING_WIDTH: usize = 4;

/// Bits of the input value taken into the conversion
const INPUT_BITS: u32 = 12;

/// Encoded reading as sent on the wire
pub type EncodedReading = [u8; READING_WIDTH];

/// Convert the low 12 bits of `value` into four decimal digits, most
/// significant first.
pub fn to_bcd(value: u16) -> [u8; READING_WIDTH] {
    let mut bcd: u16 = 0;

    for bit in (0..INPUT_BITS).rev() {
        for shift in [0u16, 4, 8, 12] {
            if (bcd >> shift) & 0xF >= 5 {
                bcd += 3 << shift;
            }
        }
        bcd = (bcd << 1) | ((value >> bit) & 1);
    }

    [
        ((bcd >> 12) & 0xF) as u8,
        ((bcd >> 8) & 0xF) as u8,
        ((bcd >> 4) & 0xF) as u8,
        (bcd & 0xF) as u8,
    ]
}

/// Encode an averaged value for transmission.
///
/// High-order zeros before the first nonzero digit become spaces; the last
/// digit is always rendered.
pub fn encode_reading(value: u16) -> EncodedReading {
    let digits = to_bcd(value);
    let mut out = [b' '; READING_WIDTH];
    let mut significant = false;

    for (i, &digit) in digits.iter().enumerate() {
        let last = i == READING_WIDTH - 1;
        significant |= digit != 0 || last;
        if significant {
            out[i] = b'0' + digit;
        }
    }
    out
}

/// Decode a reading received from a node
pub fn decode_reading(bytes: &[u8]) -> Result<u16, ProtocolError> {
    if bytes.len() != READING_WIDTH {
        return Err(ProtocolError::InvalidReading(format!(
            "expected {} bytes, got {}",
            READING_WIDTH,
            bytes.len()
        )));
    }

    let digits = bytes.iter().skip_while(|&&b| b == b' ');
    let mut value: u16 = 0;
    let mut count = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(ProtocolError::InvalidReading(format!("{:?}", bytes)));
        }
        value = value * 10 + u16::from(b - b'0');
        count += 1;
    }

    if count == 0 {
        return Err(ProtocolError::InvalidReading("no digits".to_string()));
    }
    Ok(value)
}
