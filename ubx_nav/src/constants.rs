pub const UBX_SYNC_CHAR_1: u8 = 0xb5;
pub const UBX_SYNC_CHAR_2: u8 = 0x62;
#[cfg(feature = "alloc")]
pub(crate) const UBX_SYNC_SIZE: usize = 2;
#[cfg(feature = "alloc")]
pub(crate) const UBX_PAYLOAD_SIZE_LEN: usize = 2;
#[cfg(feature = "alloc")]
pub(crate) const UBX_CLASS_LEN: usize = 1;
#[cfg(feature = "alloc")]
pub(crate) const UBX_ID_LEN: usize = 1;
#[cfg(feature = "alloc")]
pub(crate) const UBX_HEADER_LEN: usize =
    UBX_SYNC_SIZE + UBX_PAYLOAD_SIZE_LEN + UBX_CLASS_LEN + UBX_ID_LEN;
#[cfg(feature = "alloc")]
pub(crate) const UBX_CHECKSUM_LEN: usize = 2;

/// Header plus checksum, everything in a frame that is not payload
#[cfg(feature = "alloc")]
pub(crate) const UBX_FRAME_OVERHEAD: usize = UBX_HEADER_LEN + UBX_CHECKSUM_LEN;

/// Largest payload the wire format can describe
#[cfg(feature = "alloc")]
pub(crate) const UBX_MAX_WIRE_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Default bound on the declared payload length accepted by the parser
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 512;

pub const NMEA_CLASS: u8 = 0xf0;
