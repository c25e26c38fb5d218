use crate::{error::DecodeError, UbxPacketMeta};

const ACK_PAYLOAD_LEN: usize = 2;

fn class_and_id(packet: &'static str, payload: &[u8]) -> Result<(u8, u8), DecodeError> {
    if payload.len() < ACK_PAYLOAD_LEN {
        return Err(DecodeError::TooShort {
            packet,
            expect: ACK_PAYLOAD_LEN,
            got: payload.len(),
        });
    }
    Ok((payload[0], payload[1]))
}

/// Message Acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AckAck {
    class: u8,
    msg_id: u8,
}

impl UbxPacketMeta for AckAck {
    const CLASS: u8 = 0x05;
    const ID: u8 = 0x01;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(ACK_PAYLOAD_LEN as u16);
}

impl AckAck {
    pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        let (class, msg_id) = class_and_id("AckAck", payload)?;
        Ok(Self { class, msg_id })
    }

    /// Class ID of the acknowledged message
    pub fn class(&self) -> u8 {
        self.class
    }

    /// Message ID of the acknowledged message
    pub fn msg_id(&self) -> u8 {
        self.msg_id
    }

    /// Does this acknowledge the packet `T`
    pub fn is_ack_for<T: UbxPacketMeta>(&self) -> bool {
        self.class == T::CLASS && self.msg_id == T::ID
    }
}

/// Message Not-Acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AckNak {
    class: u8,
    msg_id: u8,
}

impl UbxPacketMeta for AckNak {
    const CLASS: u8 = 0x05;
    const ID: u8 = 0x00;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(ACK_PAYLOAD_LEN as u16);
}

impl AckNak {
    pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        let (class, msg_id) = class_and_id("AckNak", payload)?;
        Ok(Self { class, msg_id })
    }

    /// Class ID of the NACKed message
    pub fn class(&self) -> u8 {
        self.class
    }

    /// Message ID of the NACKed message
    pub fn msg_id(&self) -> u8 {
        self.msg_id
    }

    pub fn is_nak_for<T: UbxPacketMeta>(&self) -> bool {
        self.class == T::CLASS && self.msg_id == T::ID
    }
}
