//! # ubx_nav
//!
//! A small, streaming codec for the UBX protocol spoken by u-blox GPS receivers, built
//! around the one message a position consumer actually needs: NAV-PVT.
//!
//! Constructing Packets
//! ====================
//!
//! Configuration commands are built with the `Builder` structs, for example switching the
//! navigation solution rate to 5 Hz:
//! ```
//! use ubx_nav::{CfgRateBuilder, UpdateRate};
//!
//! let packet: [u8; 14] = CfgRateBuilder::from(UpdateRate::Hz5).into_packet_bytes();
//! assert_eq!(&packet[..2], &[0xb5, 0x62]);
//! ```
//! Arbitrary frames can be assembled with [`build_message`].
//!
//! Parsing Packets
//! ===============
//!
//! The [`Parser`] is fed one byte at a time and hands back a complete [`Frame`] whenever the
//! last checksum byte of a valid frame arrives:
//! ```
//! # #[cfg(feature = "alloc")] {
//! use ubx_nav::Parser;
//!
//! let mut parser = Parser::default();
//! let my_raw_data = [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x01, 0x0f, 0x38]; // From your serial port
//! for byte in my_raw_data {
//!     match parser.feed(byte) {
//!         Some(Ok(frame)) => {
//!             // We've received a complete frame, we can handle it
//!             assert_eq!((frame.class(), frame.msg_id()), (0x05, 0x01));
//!         },
//!         Some(Err(_)) => {
//!             // Received a malformed frame
//!         },
//!         None => {
//!             // Frame not complete yet
//!         },
//!     }
//! }
//! # }
//! ```
//!
//! Tracking Fixes
//! ==============
//!
//! The [`Receiver`] bundles a parser with a [`FixTracker`], which counts messages, keeps the
//! last NAV-PVT solution and calls a registered handler for every new fix:
//! ```
//! # #[cfg(feature = "std")] {
//! use ubx_nav::Receiver;
//!
//! let mut receiver = Receiver::default();
//! receiver.set_fix_handler(|fix: &ubx_nav::NavigationFix| {
//!     println!("fix #{} with {} satellites", fix.fix_number(), fix.pvt().num_satellites());
//! });
//! receiver.feed_all(&[0xb5, 0x62]);
//! assert!(receiver.last_fix().is_none());
//! assert!(receiver.position_fix_age().is_none());
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

#[cfg(feature = "alloc")]
pub use crate::error::ParserError;
#[cfg(feature = "alloc")]
pub use crate::parser::{Parser, ParserBuilder, ParserIter};
pub use crate::{
    constants::{DEFAULT_MAX_PAYLOAD_LEN, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2},
    error::{DateTimeError, DecodeError, EncodeError},
    parser::checksum::{checksum, ubx_checksum},
    ubx_packets::*,
};
#[cfg(feature = "std")]
pub use crate::{
    receiver::Receiver,
    tracker::{Clock, FixHandler, FixTracker, FixValidityPolicy, MonotonicClock, NavigationFix},
};

mod constants;
mod error;
mod parser;
#[cfg(feature = "std")]
mod receiver;
#[cfg(feature = "std")]
mod tracker;
mod ubx_packets;
