pub(crate) mod checksum;

#[cfg(feature = "alloc")]
pub use self::frame_parser::{Parser, ParserBuilder, ParserIter};

#[cfg(feature = "alloc")]
mod frame_parser {
    use alloc::vec::Vec;

    use super::checksum::UbxChecksumCalc;
    use crate::{
        constants::DEFAULT_MAX_PAYLOAD_LEN,
        error::ParserError,
        ubx_packets::{Frame, SYNC_CHAR_1, SYNC_CHAR_2},
    };

    /// Where in a frame the next byte belongs
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ParserState {
        AwaitSync1,
        AwaitSync2,
        ReadClass,
        ReadId,
        ReadLenLo,
        ReadLenHi,
        ReadPayload,
        ReadCkA,
        ReadCkB,
    }

    /// Streaming UBX frame decoder.
    ///
    /// Bytes are pushed one at a time with [`Parser::feed`], nothing is buffered beyond the
    /// payload of the frame in progress. Payload bytes are never scanned for sync
    /// characters, so `0xB5 0x62` inside a payload does not disturb the frame.
    #[derive(Debug, Clone)]
    pub struct Parser {
        state: ParserState,
        class: u8,
        msg_id: u8,
        len_lo: u8,
        declared_len: usize,
        payload: Vec<u8>,
        checksum: UbxChecksumCalc,
        ck_a: u8,
        max_payload_len: usize,
    }

    impl Default for Parser {
        fn default() -> Self {
            ParserBuilder::new().build()
        }
    }

    /// Configuration of a [`Parser`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParserBuilder {
        max_payload_len: usize,
    }

    impl Default for ParserBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ParserBuilder {
        pub const fn new() -> Self {
            Self {
                max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
            }
        }

        /// Frames declaring a longer payload are dropped with [`ParserError::PayloadTooLong`]
        pub const fn with_max_payload_len(mut self, max_payload_len: usize) -> Self {
            self.max_payload_len = max_payload_len;
            self
        }

        pub fn build(self) -> Parser {
            Parser {
                state: ParserState::AwaitSync1,
                class: 0,
                msg_id: 0,
                len_lo: 0,
                declared_len: 0,
                payload: Vec::with_capacity(self.max_payload_len.min(DEFAULT_MAX_PAYLOAD_LEN)),
                checksum: UbxChecksumCalc::new(),
                ck_a: 0,
                max_payload_len: self.max_payload_len,
            }
        }
    }

    impl Parser {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn max_payload_len(&self) -> usize {
            self.max_payload_len
        }

        /// `true` while no frame is in progress
        pub fn is_idle(&self) -> bool {
            self.state == ParserState::AwaitSync1
        }

        /// Drop any partially received frame and wait for the next sync sequence
        pub fn reset(&mut self) {
            self.state = ParserState::AwaitSync1;
            self.class = 0;
            self.msg_id = 0;
            self.len_lo = 0;
            self.declared_len = 0;
            self.payload.clear();
            self.checksum = UbxChecksumCalc::new();
            self.ck_a = 0;
        }

        /// Push one byte from the transport.
        ///
        /// Returns `None` while a frame is incomplete, `Some(Ok(_))` once the last checksum
        /// byte of a valid frame arrives and `Some(Err(_))` for a frame that had to be
        /// dropped. The parser is ready for the next frame after every `Some`.
        pub fn feed(&mut self, byte: u8) -> Option<Result<Frame, ParserError>> {
            match self.state {
                ParserState::AwaitSync1 => {
                    if byte == SYNC_CHAR_1 {
                        self.state = ParserState::AwaitSync2;
                    } else {
                        log::trace!("discarding 0x{:02x} while waiting for sync", byte);
                    }
                },
                ParserState::AwaitSync2 => match byte {
                    SYNC_CHAR_2 => {
                        self.checksum = UbxChecksumCalc::new();
                        self.state = ParserState::ReadClass;
                    },
                    // Treat the repeated first sync char as a new frame start
                    SYNC_CHAR_1 => {
                        log::trace!("repeated sync char, resynchronising");
                    },
                    _ => {
                        log::trace!("expected second sync char, got 0x{:02x}", byte);
                        self.state = ParserState::AwaitSync1;
                    },
                },
                ParserState::ReadClass => {
                    self.checksum.update_byte(byte);
                    self.class = byte;
                    self.state = ParserState::ReadId;
                },
                ParserState::ReadId => {
                    self.checksum.update_byte(byte);
                    self.msg_id = byte;
                    self.state = ParserState::ReadLenLo;
                },
                ParserState::ReadLenLo => {
                    self.checksum.update_byte(byte);
                    self.len_lo = byte;
                    self.state = ParserState::ReadLenHi;
                },
                ParserState::ReadLenHi => {
                    self.checksum.update_byte(byte);
                    let declared = usize::from(u16::from_le_bytes([self.len_lo, byte]));
                    if declared > self.max_payload_len {
                        log::debug!(
                            "dropping frame class 0x{:02x} id 0x{:02x}: declared length {} over {}",
                            self.class,
                            self.msg_id,
                            declared,
                            self.max_payload_len
                        );
                        let max = self.max_payload_len;
                        self.reset();
                        return Some(Err(ParserError::PayloadTooLong { declared, max }));
                    }
                    self.declared_len = declared;
                    self.payload.clear();
                    self.state = if declared == 0 {
                        ParserState::ReadCkA
                    } else {
                        ParserState::ReadPayload
                    };
                },
                ParserState::ReadPayload => {
                    self.checksum.update_byte(byte);
                    self.payload.push(byte);
                    if self.payload.len() == self.declared_len {
                        self.state = ParserState::ReadCkA;
                    }
                },
                ParserState::ReadCkA => {
                    self.ck_a = byte;
                    self.state = ParserState::ReadCkB;
                },
                ParserState::ReadCkB => return Some(self.finish_frame(byte)),
            }
            None
        }

        fn finish_frame(&mut self, ck_b: u8) -> Result<Frame, ParserError> {
            let payload =
                core::mem::replace(&mut self.payload, Vec::with_capacity(self.declared_len));
            let frame = Frame::from_parts(self.class, self.msg_id, payload);
            let ck_a = self.ck_a;
            let checksum = self.checksum;
            self.reset();

            if checksum.is_valid(ck_a, ck_b) {
                log::debug!(
                    "frame class 0x{:02x} id 0x{:02x}, {} payload bytes",
                    frame.class(),
                    frame.msg_id(),
                    frame.payload().len()
                );
                Ok(frame)
            } else {
                let (expect_a, expect_b) = checksum.result();
                log::debug!(
                    "checksum mismatch for class 0x{:02x} id 0x{:02x}",
                    frame.class(),
                    frame.msg_id()
                );
                Err(ParserError::InvalidChecksum {
                    expect: u16::from_le_bytes([expect_a, expect_b]),
                    got: u16::from_le_bytes([ck_a, ck_b]),
                    frame,
                })
            }
        }

        /// Feed a whole chunk, yielding every frame event it completes
        pub fn consume<'a>(&'a mut self, new_data: &'a [u8]) -> ParserIter<'a> {
            ParserIter {
                parser: self,
                data: new_data.iter(),
            }
        }
    }

    /// Iterator over the frame events of one chunk, see [`Parser::consume`]
    pub struct ParserIter<'a> {
        parser: &'a mut Parser,
        data: core::slice::Iter<'a, u8>,
    }

    impl Iterator for ParserIter<'_> {
        type Item = Result<Frame, ParserError>;

        fn next(&mut self) -> Option<Self::Item> {
            for &byte in self.data.by_ref() {
                if let Some(event) = self.parser.feed(byte) {
                    return Some(event);
                }
            }
            None
        }
    }

}
