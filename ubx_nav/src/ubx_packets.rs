mod ack;
mod cfg_msg;
mod cfg_rate;
mod nav_pvt;
mod types;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::error::DecodeError;
#[cfg(feature = "alloc")]
use crate::{
    constants::{UBX_FRAME_OVERHEAD, UBX_MAX_WIRE_PAYLOAD_LEN},
    error::EncodeError,
    parser::checksum::UbxChecksumCalc,
};

pub use crate::constants::{UBX_SYNC_CHAR_1 as SYNC_CHAR_1, UBX_SYNC_CHAR_2 as SYNC_CHAR_2};
pub use ack::{AckAck, AckNak};
pub use cfg_msg::{
    nav_pvt_setup_commands, CfgMsg, CfgMsgAllPortsBuilder, CfgMsgSinglePortBuilder, NmeaSentence,
    PortId,
};
pub use cfg_rate::{AlignmentToReferenceTime, CfgRate, CfgRateBuilder, UpdateRate};
pub use nav_pvt::{
    decode_nav_fix, GnssFixType, NavPvt, NavPvtFlags, NavPvtFlags2, NavPvtFlags3, NavPvtValidFlags,
};
pub use types::{Position, Velocity};

/// Information about concrete UBX protocol's packet
pub trait UbxPacketMeta {
    const CLASS: u8;
    const ID: u8;
    const FIXED_PAYLOAD_LEN: Option<u16>;
}

/// A checksum-validated UBX frame: class, message id and raw payload
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    class: u8,
    msg_id: u8,
    payload: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl Frame {
    /// Fails if the payload does not fit the 16 bit length field
    pub fn new(class: u8, msg_id: u8, payload: Vec<u8>) -> Result<Self, EncodeError> {
        if payload.len() > UBX_MAX_WIRE_PAYLOAD_LEN {
            return Err(EncodeError::PayloadTooLong {
                len: payload.len(),
            });
        }
        Ok(Self {
            class,
            msg_id,
            payload,
        })
    }

    /// The parser enforces the length bound itself
    pub(crate) fn from_parts(class: u8, msg_id: u8, payload: Vec<u8>) -> Self {
        debug_assert!(payload.len() <= UBX_MAX_WIRE_PAYLOAD_LEN);
        Self {
            class,
            msg_id,
            payload,
        }
    }

    #[inline]
    pub fn class(&self) -> u8 {
        self.class
    }

    #[inline]
    pub fn msg_id(&self) -> u8 {
        self.msg_id
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Is this frame the packet `T`
    #[inline]
    pub fn is<T: UbxPacketMeta>(&self) -> bool {
        self.class == T::CLASS && self.msg_id == T::ID
    }

    /// Checksum this frame carries on the wire
    pub fn checksum(&self) -> (u8, u8) {
        // Length fits in u16, see `Frame::new`
        let len_bytes = (self.payload.len() as u16).to_le_bytes();
        let mut calc = UbxChecksumCalc::new();
        calc.update(&[self.class, self.msg_id, len_bytes[0], len_bytes[1]]);
        calc.update(&self.payload);
        calc.result()
    }

    /// Serialize into wire format, sync characters and checksum included
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + UBX_FRAME_OVERHEAD);
        self.extend_to(&mut out);
        out
    }

    pub fn extend_to<T: core::iter::Extend<u8>>(&self, out: &mut T) {
        let len_bytes = (self.payload.len() as u16).to_le_bytes();
        out.extend([
            SYNC_CHAR_1,
            SYNC_CHAR_2,
            self.class,
            self.msg_id,
            len_bytes[0],
            len_bytes[1],
        ]);
        out.extend(self.payload.iter().copied());
        let (ck_a, ck_b) = self.checksum();
        out.extend([ck_a, ck_b]);
    }

    /// Decode the payload into one of the known packets
    pub fn packet(&self) -> Result<PacketRef<'_>, DecodeError> {
        match_packet(self.class, self.msg_id, &self.payload)
    }
}

/// Assemble `[0xB5, 0x62, class, id, len_lo, len_hi, payload.., ck_a, ck_b]`
#[cfg(feature = "alloc")]
pub fn build_message(class: u8, msg_id: u8, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let len = u16::try_from(payload.len()).map_err(|_| EncodeError::PayloadTooLong {
        len: payload.len(),
    })?;
    let len_bytes = len.to_le_bytes();

    let mut out = Vec::with_capacity(payload.len() + UBX_FRAME_OVERHEAD);
    out.extend_from_slice(&[
        SYNC_CHAR_1,
        SYNC_CHAR_2,
        class,
        msg_id,
        len_bytes[0],
        len_bytes[1],
    ]);
    out.extend_from_slice(payload);

    let mut checksum_calc = UbxChecksumCalc::new();
    checksum_calc.update(&out[2..]);
    let (ck_a, ck_b) = checksum_calc.result();
    out.extend_from_slice(&[ck_a, ck_b]);
    Ok(out)
}

/// Frame that is not one of the packets this crate decodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UbxUnknownPacketRef<'a> {
    pub payload: &'a [u8],
    pub class: u8,
    pub msg_id: u8,
}

/// All packets this crate can decode from a frame
#[derive(Debug, Clone, Copy)]
pub enum PacketRef<'a> {
    NavPvt(NavPvt),
    AckAck(AckAck),
    AckNak(AckNak),
    Unknown(UbxUnknownPacketRef<'a>),
}

impl PacketRef<'_> {
    pub fn class_and_msg_id(&self) -> (u8, u8) {
        match self {
            PacketRef::NavPvt(_) => (NavPvt::CLASS, NavPvt::ID),
            PacketRef::AckAck(_) => (AckAck::CLASS, AckAck::ID),
            PacketRef::AckNak(_) => (AckNak::CLASS, AckNak::ID),
            PacketRef::Unknown(packet) => (packet.class, packet.msg_id),
        }
    }
}

/// Dispatch a payload on its class/id. Anything that is not decoded here is handed
/// back untouched as [`PacketRef::Unknown`].
pub fn match_packet(class: u8, msg_id: u8, payload: &[u8]) -> Result<PacketRef<'_>, DecodeError> {
    match (class, msg_id) {
        (NavPvt::CLASS, NavPvt::ID) => NavPvt::from_payload(payload).map(PacketRef::NavPvt),
        (AckAck::CLASS, AckAck::ID) => AckAck::from_payload(payload).map(PacketRef::AckAck),
        (AckNak::CLASS, AckNak::ID) => AckNak::from_payload(payload).map(PacketRef::AckNak),
        _ => Ok(PacketRef::Unknown(UbxUnknownPacketRef {
            payload,
            class,
            msg_id,
        })),
    }
}

/// Little-endian field readers for fixed payload layouts. Callers check the payload
/// length once up front.
pub(crate) mod le {
    #[inline]
    pub(crate) fn u16_at(payload: &[u8], off: usize) -> u16 {
        u16::from_le_bytes([payload[off], payload[off + 1]])
    }

    #[inline]
    pub(crate) fn i16_at(payload: &[u8], off: usize) -> i16 {
        i16::from_le_bytes([payload[off], payload[off + 1]])
    }

    #[inline]
    pub(crate) fn u32_at(payload: &[u8], off: usize) -> u32 {
        u32::from_le_bytes([
            payload[off],
            payload[off + 1],
            payload[off + 2],
            payload[off + 3],
        ])
    }

    #[inline]
    pub(crate) fn i32_at(payload: &[u8], off: usize) -> i32 {
        i32::from_le_bytes([
            payload[off],
            payload[off + 1],
            payload[off + 2],
            payload[off + 3],
        ])
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn build_message_matches_frame_bytes() {
        let payload = vec![0x06, 0x01];
        let frame = Frame::new(0x05, 0x01, payload.clone()).unwrap();
        assert_eq!(
            build_message(0x05, 0x01, &payload).unwrap(),
            frame.to_bytes()
        );
        assert_eq!(
            frame.to_bytes(),
            [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x01, 0x0f, 0x38]
        );
    }

    #[test]
    fn build_message_empty_payload() {
        assert_eq!(
            build_message(0x0a, 0x04, &[]).unwrap(),
            [0xb5, 0x62, 0x0a, 0x04, 0x00, 0x00, 0x0e, 0x34]
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let payload = vec![0u8; UBX_MAX_WIRE_PAYLOAD_LEN + 1];
        assert_eq!(
            build_message(0x01, 0x07, &payload),
            Err(EncodeError::PayloadTooLong {
                len: UBX_MAX_WIRE_PAYLOAD_LEN + 1
            })
        );
        assert!(Frame::new(0x01, 0x07, payload).is_err());
    }

    #[test]
    fn unknown_packets_pass_through() {
        let payload = [1, 2, 3];
        match match_packet(0x0a, 0x09, &payload) {
            Ok(PacketRef::Unknown(packet)) => {
                assert_eq!(packet.class, 0x0a);
                assert_eq!(packet.msg_id, 0x09);
                assert_eq!(packet.payload, &payload);
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn frame_is_packet() {
        let frame = Frame::new(0x01, 0x07, vec![]).unwrap();
        assert!(frame.is::<NavPvt>());
        assert!(!frame.is::<AckAck>());
        assert!(matches!(
            frame.packet(),
            Err(DecodeError::TooShort { got: 0, .. })
        ));
    }

    #[test]
    fn short_payload_reports_layout_length() {
        let Err(err) = match_packet(0x01, 0x07, &[0u8; 91]) else {
            panic!("91 byte NAV-PVT must not decode");
        };
        let DecodeError::TooShort {
            packet,
            expect,
            got,
        } = err;
        assert_eq!((packet, expect, got), ("NavPvt", 92, 91));
        assert_eq!(
            alloc::format!("{}", err),
            "Invalid packet(NavPvt) length, expect at least 92, got 91"
        );
    }
}
