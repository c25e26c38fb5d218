use core::fmt;

#[cfg(feature = "alloc")]
use crate::ubx_packets::Frame;

/// Error that possible during frame parsing
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The received checksum does not match the one computed over the frame.
    /// The malformed frame is kept for diagnostics.
    InvalidChecksum { expect: u16, got: u16, frame: Frame },
    /// The length field announced more payload than the parser is allowed to buffer
    PayloadTooLong { declared: usize, max: usize },
}

#[cfg(feature = "alloc")]
impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidChecksum { expect, got, frame } => write!(
                f,
                "Not valid packet's checksum, expect {:x}, got {:x} (class 0x{:02x}, id 0x{:02x}, {} bytes)",
                expect,
                got,
                frame.class(),
                frame.msg_id(),
                frame.payload().len()
            ),
            ParserError::PayloadTooLong { declared, max } => write!(
                f,
                "Declared payload length {} exceeds the maximum of {}",
                declared, max
            ),
        }
    }
}

#[cfg(feature = "alloc")]
impl core::error::Error for ParserError {}

/// Error that possible while turning a frame payload into a typed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is shorter than the fixed layout of the packet
    TooShort {
        packet: &'static str,
        expect: usize,
        got: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TooShort {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect at least {}, got {}",
                packet, expect, got
            ),
        }
    }
}

impl core::error::Error for DecodeError {}

/// Error that possible while assembling an outgoing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload does not fit the 16 bit length field
    PayloadTooLong { len: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::PayloadTooLong { len } => {
                write!(f, "Payload of {} bytes does not fit in a UBX frame", len)
            },
        }
    }
}

impl core::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl core::error::Error for DateTimeError {}
