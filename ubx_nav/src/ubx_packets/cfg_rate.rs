use crate::{ubx_checksum, UbxPacketMeta, SYNC_CHAR_1, SYNC_CHAR_2};

/// Navigation/Measurement Rate Settings
pub struct CfgRate;

impl UbxPacketMeta for CfgRate {
    const CLASS: u8 = 0x06;
    const ID: u8 = 0x08;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(6);
}

/// Navigation/Measurement Rate Settings
/// Struct that is used to construct packets, see the crate-level documentation for more information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgRateBuilder {
    /// Measurement Rate, GPS measurements are taken every `measure_rate_ms` milliseconds
    pub measure_rate_ms: u16,

    /// Navigation Rate, in number of measurement cycles.
    ///
    /// On u-blox 5 and u-blox 6, this parameter cannot be changed, and is always equals 1.
    pub nav_rate: u16,

    /// Alignment to reference time
    pub time_ref: AlignmentToReferenceTime,
}

impl Default for CfgRateBuilder {
    fn default() -> Self {
        UpdateRate::Hz1.into()
    }
}

impl CfgRateBuilder {
    pub const PACKET_LEN: usize = 14;

    #[inline]
    pub fn into_packet_bytes(self) -> [u8; Self::PACKET_LEN] {
        let mut ret = [0u8; Self::PACKET_LEN];
        ret[0] = SYNC_CHAR_1;
        ret[1] = SYNC_CHAR_2;
        ret[2] = CfgRate::CLASS;
        ret[3] = CfgRate::ID;
        // Some(6), see `UbxPacketMeta` above
        let pack_len_bytes = 6u16.to_le_bytes();
        ret[4] = pack_len_bytes[0];
        ret[5] = pack_len_bytes[1];
        let bytes = self.measure_rate_ms.to_le_bytes();
        ret[6] = bytes[0];
        ret[7] = bytes[1];
        let bytes = self.nav_rate.to_le_bytes();
        ret[8] = bytes[0];
        ret[9] = bytes[1];
        let bytes = self.time_ref.into_raw().to_le_bytes();
        ret[10] = bytes[0];
        ret[11] = bytes[1];
        let (ck_a, ck_b) = ubx_checksum(&ret[2..(Self::PACKET_LEN - 2)]);
        ret[Self::PACKET_LEN - 2] = ck_a;
        ret[Self::PACKET_LEN - 1] = ck_b;
        ret
    }
}

impl From<CfgRateBuilder> for [u8; 14] {
    fn from(x: CfgRateBuilder) -> Self {
        x.into_packet_bytes()
    }
}

/// Alignment to reference time
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentToReferenceTime {
    Utc = 0,
    Gps = 1,
    Glo = 2,
    Bds = 3,
    Gal = 4,
}

impl AlignmentToReferenceTime {
    const fn into_raw(self) -> u16 {
        self as u16
    }
}

/// Solution rates commonly used with NAV-PVT output. All of them compute one navigation
/// solution per measurement and align measurements to GPS time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateRate {
    Hz1,
    Hz2,
    Hz5,
    Hz10,
}

impl UpdateRate {
    pub const fn measure_rate_ms(self) -> u16 {
        match self {
            UpdateRate::Hz1 => 1000,
            UpdateRate::Hz2 => 500,
            UpdateRate::Hz5 => 200,
            UpdateRate::Hz10 => 100,
        }
    }

    /// Preset for a rate given in Hz, if there is one
    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            1 => Some(UpdateRate::Hz1),
            2 => Some(UpdateRate::Hz2),
            5 => Some(UpdateRate::Hz5),
            10 => Some(UpdateRate::Hz10),
            _ => None,
        }
    }
}

impl From<UpdateRate> for CfgRateBuilder {
    fn from(rate: UpdateRate) -> Self {
        CfgRateBuilder {
            measure_rate_ms: rate.measure_rate_ms(),
            nav_rate: 1,
            time_ref: AlignmentToReferenceTime::Gps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_hz_gps_aligned() {
        let builder = CfgRateBuilder::default();
        assert_eq!(builder.measure_rate_ms, 1000);
        assert_eq!(builder.nav_rate, 1);
        assert_eq!(builder.time_ref, AlignmentToReferenceTime::Gps);
    }

    #[test]
    fn from_hz() {
        assert_eq!(UpdateRate::from_hz(5), Some(UpdateRate::Hz5));
        assert_eq!(UpdateRate::from_hz(4), None);
    }

    #[test]
    fn utc_alignment_payload() {
        let bytes = CfgRateBuilder {
            measure_rate_ms: 250,
            nav_rate: 2,
            time_ref: AlignmentToReferenceTime::Utc,
        }
        .into_packet_bytes();
        assert_eq!(&bytes[6..12], &[0xfa, 0x00, 0x02, 0x00, 0x00, 0x00]);
    }
}
