use crate::{constants::NMEA_CLASS, ubx_checksum, NavPvt, UbxPacketMeta, SYNC_CHAR_1, SYNC_CHAR_2};

/// Set Message Rate(s)
///
/// Send rate is relative to the event a message is registered on. For example, if the
/// rate of a navigation message is set to 2, the message is sent every second navigation
/// solution. A rate of 0 disables the message on that port.
pub struct CfgMsg;

impl UbxPacketMeta for CfgMsg {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x01;
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
}

/// I/O port of the receiver, also the index into the per-port rate table of
/// [`CfgMsgAllPortsBuilder`]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortId {
    I2c = 0,
    Uart1 = 1,
    Uart2 = 2,
    Usb = 3,
    Spi = 4,
}

impl PortId {
    const fn index(self) -> usize {
        self as usize
    }
}

/// Standard NMEA sentences a receiver emits by default, all live in class `0xF0`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NmeaSentence {
    Gga = 0x00,
    Gll = 0x01,
    Gsa = 0x02,
    Gsv = 0x03,
    Rmc = 0x04,
    Vtg = 0x05,
}

impl NmeaSentence {
    pub const fn class(self) -> u8 {
        NMEA_CLASS
    }

    pub const fn msg_id(self) -> u8 {
        self as u8
    }
}

/// Set Message rate configuration for all six I/O ports
/// Struct that is used to construct packets, see the crate-level documentation for more information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CfgMsgAllPortsBuilder {
    pub msg_class: u8,
    pub msg_id: u8,
    /// Send rate on I/O Port (6 Ports), indexed by [`PortId`]
    pub rates: [u8; 6],
}

impl CfgMsgAllPortsBuilder {
    pub const PACKET_LEN: usize = 16;
    const PAYLOAD_LEN: u16 = 8;

    #[inline]
    pub fn set_rate_for<T: UbxPacketMeta>(rates: [u8; 6]) -> Self {
        Self {
            msg_class: T::CLASS,
            msg_id: T::ID,
            rates,
        }
    }

    /// Turn the message off on every port
    #[inline]
    pub fn disable(msg_class: u8, msg_id: u8) -> Self {
        Self {
            msg_class,
            msg_id,
            rates: [0; 6],
        }
    }

    /// Output the message on `port` only, every `rate` navigation solutions
    #[inline]
    pub fn enable_on_port(msg_class: u8, msg_id: u8, port: PortId, rate: u8) -> Self {
        let mut rates = [0; 6];
        rates[port.index()] = rate;
        Self {
            msg_class,
            msg_id,
            rates,
        }
    }

    #[inline]
    pub fn disable_nmea(sentence: NmeaSentence) -> Self {
        Self::disable(sentence.class(), sentence.msg_id())
    }

    #[inline]
    pub fn into_packet_bytes(self) -> [u8; Self::PACKET_LEN] {
        let mut ret = [0u8; Self::PACKET_LEN];
        ret[0] = SYNC_CHAR_1;
        ret[1] = SYNC_CHAR_2;
        ret[2] = CfgMsg::CLASS;
        ret[3] = CfgMsg::ID;
        let pack_len_bytes = Self::PAYLOAD_LEN.to_le_bytes();
        ret[4] = pack_len_bytes[0];
        ret[5] = pack_len_bytes[1];
        ret[6] = self.msg_class;
        ret[7] = self.msg_id;
        ret[8..14].copy_from_slice(&self.rates);
        let (ck_a, ck_b) = ubx_checksum(&ret[2..(Self::PACKET_LEN - 2)]);
        ret[Self::PACKET_LEN - 2] = ck_a;
        ret[Self::PACKET_LEN - 1] = ck_b;
        ret
    }
}

impl From<CfgMsgAllPortsBuilder> for [u8; 16] {
    fn from(x: CfgMsgAllPortsBuilder) -> Self {
        x.into_packet_bytes()
    }
}

/// Set Message rate configuration on the port the command arrives on
/// Struct that is used to construct packets, see the crate-level documentation for more information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CfgMsgSinglePortBuilder {
    pub msg_class: u8,
    pub msg_id: u8,
    /// Send rate on current Target
    pub rate: u8,
}

impl CfgMsgSinglePortBuilder {
    pub const PACKET_LEN: usize = 11;
    const PAYLOAD_LEN: u16 = 3;

    #[inline]
    pub fn set_rate_for<T: UbxPacketMeta>(rate: u8) -> Self {
        Self {
            msg_class: T::CLASS,
            msg_id: T::ID,
            rate,
        }
    }

    #[inline]
    pub fn into_packet_bytes(self) -> [u8; Self::PACKET_LEN] {
        let mut ret = [0u8; Self::PACKET_LEN];
        ret[0] = SYNC_CHAR_1;
        ret[1] = SYNC_CHAR_2;
        ret[2] = CfgMsg::CLASS;
        ret[3] = CfgMsg::ID;
        let pack_len_bytes = Self::PAYLOAD_LEN.to_le_bytes();
        ret[4] = pack_len_bytes[0];
        ret[5] = pack_len_bytes[1];
        ret[6] = self.msg_class;
        ret[7] = self.msg_id;
        ret[8] = self.rate;
        let (ck_a, ck_b) = ubx_checksum(&ret[2..(Self::PACKET_LEN - 2)]);
        ret[Self::PACKET_LEN - 2] = ck_a;
        ret[Self::PACKET_LEN - 1] = ck_b;
        ret
    }
}

impl From<CfgMsgSinglePortBuilder> for [u8; 11] {
    fn from(x: CfgMsgSinglePortBuilder) -> Self {
        x.into_packet_bytes()
    }
}

/// Commands that switch a factory-default receiver over to NAV-PVT only output:
/// the GLL, GSV, GSA, GGA, VTG and RMC sentences are turned off on every port and
/// NAV-PVT is enabled once per solution on UART1.
///
/// Nothing is saved to non-volatile memory, the receiver returns to its defaults on a
/// power cycle.
pub fn nav_pvt_setup_commands() -> [[u8; CfgMsgAllPortsBuilder::PACKET_LEN]; 7] {
    [
        CfgMsgAllPortsBuilder::disable_nmea(NmeaSentence::Gll).into_packet_bytes(),
        CfgMsgAllPortsBuilder::disable_nmea(NmeaSentence::Gsv).into_packet_bytes(),
        CfgMsgAllPortsBuilder::disable_nmea(NmeaSentence::Gsa).into_packet_bytes(),
        CfgMsgAllPortsBuilder::disable_nmea(NmeaSentence::Gga).into_packet_bytes(),
        CfgMsgAllPortsBuilder::disable_nmea(NmeaSentence::Vtg).into_packet_bytes(),
        CfgMsgAllPortsBuilder::disable_nmea(NmeaSentence::Rmc).into_packet_bytes(),
        CfgMsgAllPortsBuilder::enable_on_port(NavPvt::CLASS, NavPvt::ID, PortId::Uart1, 1)
            .into_packet_bytes(),
    ]
}
