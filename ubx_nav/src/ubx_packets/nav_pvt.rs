use bitflags::bitflags;

use super::le::{i16_at, i32_at, u16_at, u32_at};
use crate::{error::DecodeError, UbxPacketMeta};

/// Navigation Position Velocity Time Solution
///
/// Decoded snapshot of one UBX-NAV-PVT message. Raw accessors return the wire values,
/// the scaled ones (`*_degrees`, `height_msl`, `ground_speed`, ...) convert to SI units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPvt {
    itow: u32,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    min: u8,
    sec: u8,
    valid: u8,
    time_accuracy: u32,
    nanosec: i32,
    fix_type: u8,
    flags: u8,
    flags2: u8,
    num_satellites: u8,
    lon: i32,
    lat: i32,
    height: i32,
    height_msl: i32,
    h_acc: u32,
    v_acc: u32,
    vel_north: i32,
    vel_east: i32,
    vel_down: i32,
    g_speed: i32,
    head_motion: i32,
    s_acc: u32,
    head_acc: u32,
    pdop: u16,
    flags3: u16,
    head_vehicle: i32,
    magnetic_declination: i16,
    magnetic_declination_accuracy: u16,
}

impl UbxPacketMeta for NavPvt {
    const CLASS: u8 = 0x01;
    const ID: u8 = 0x07;
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(92);
}

/// Decode a NAV-PVT payload, see [`NavPvt::from_payload`]
pub fn decode_nav_fix(payload: &[u8]) -> Result<NavPvt, DecodeError> {
    NavPvt::from_payload(payload)
}

impl NavPvt {
    pub const PAYLOAD_LEN: usize = 92;

    /// Payloads longer than [`NavPvt::PAYLOAD_LEN`] are accepted, the extra bytes are
    /// ignored.
    pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() < Self::PAYLOAD_LEN {
            return Err(DecodeError::TooShort {
                packet: "NavPvt",
                expect: Self::PAYLOAD_LEN,
                got: payload.len(),
            });
        }

        Ok(Self {
            itow: u32_at(payload, 0),
            year: u16_at(payload, 4),
            month: payload[6],
            day: payload[7],
            hour: payload[8],
            min: payload[9],
            sec: payload[10],
            valid: payload[11],
            time_accuracy: u32_at(payload, 12),
            nanosec: i32_at(payload, 16),
            fix_type: payload[20],
            flags: payload[21],
            flags2: payload[22],
            num_satellites: payload[23],
            lon: i32_at(payload, 24),
            lat: i32_at(payload, 28),
            height: i32_at(payload, 32),
            height_msl: i32_at(payload, 36),
            h_acc: u32_at(payload, 40),
            v_acc: u32_at(payload, 44),
            vel_north: i32_at(payload, 48),
            vel_east: i32_at(payload, 52),
            vel_down: i32_at(payload, 56),
            g_speed: i32_at(payload, 60),
            head_motion: i32_at(payload, 64),
            s_acc: u32_at(payload, 68),
            head_acc: u32_at(payload, 72),
            pdop: u16_at(payload, 76),
            flags3: u16_at(payload, 78),
            // 80..84 reserved
            head_vehicle: i32_at(payload, 84),
            magnetic_declination: i16_at(payload, 88),
            magnetic_declination_accuracy: u16_at(payload, 90),
        })
    }

    /// GPS Millisecond time of week of the navigation epoch.
    ///
    /// Messages with the same iTOW value can be assumed to have come from the same navigation solution.
    pub fn itow(&self) -> u32 {
        self.itow
    }

    /// Year (UTC)
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month, range 1..12 (UTC)
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, range 1..31 (UTC)
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour of day, range 0..23 (UTC)
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of hour, range 0..59 (UTC)
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Seconds of minute, range 0..60 (UTC)
    pub fn sec(&self) -> u8 {
        self.sec
    }

    /// Validity flags, see [NavPvtValidFlags]
    pub fn valid(&self) -> NavPvtValidFlags {
        NavPvtValidFlags::from_bits_retain(self.valid)
    }

    pub fn valid_raw(&self) -> u8 {
        self.valid
    }

    /// Time accuracy estimate in nanoseconds (UTC)
    pub fn time_accuracy(&self) -> u32 {
        self.time_accuracy
    }

    /// Fraction of second, range -1e9 .. 1e9 (UTC)
    pub fn nanosecond(&self) -> i32 {
        self.nanosec
    }

    /// GNSS Fix Type, see [GnssFixType]
    pub fn fix_type(&self) -> GnssFixType {
        GnssFixType::from(self.fix_type)
    }

    pub fn fix_type_raw(&self) -> u8 {
        self.fix_type
    }

    /// Fix status flags, see [NavPvtFlags]
    pub fn flags(&self) -> NavPvtFlags {
        NavPvtFlags::from_bits_retain(self.flags)
    }

    /// Additional flags, see [NavPvtFlags2]
    pub fn flags2(&self) -> NavPvtFlags2 {
        NavPvtFlags2::from_bits_retain(self.flags2)
    }

    /// Number of satellites used in Nav Solution
    pub fn num_satellites(&self) -> u8 {
        self.num_satellites
    }

    /// Longitude in \[deg * 1e-7\]
    pub fn lon_raw(&self) -> i32 {
        self.lon
    }

    /// Longitude in \[deg\]
    pub fn lon_degrees(&self) -> f64 {
        f64::from(self.lon) * 1e-7
    }

    /// Latitude in \[deg * 1e-7\]
    pub fn lat_raw(&self) -> i32 {
        self.lat
    }

    /// Latitude in \[deg\]
    pub fn lat_degrees(&self) -> f64 {
        f64::from(self.lat) * 1e-7
    }

    /// Height above reference ellipsoid in \[mm\]
    pub fn height_raw(&self) -> i32 {
        self.height
    }

    /// Height above reference ellipsoid in \[m\]
    pub fn height_meters(&self) -> f64 {
        f64::from(self.height) * 1e-3
    }

    /// Height above Mean Sea Level in \[mm\]
    pub fn height_msl_raw(&self) -> i32 {
        self.height_msl
    }

    /// Height above Mean Sea Level in \[m\]
    pub fn height_msl(&self) -> f64 {
        f64::from(self.height_msl) * 1e-3
    }

    /// Horizontal accuracy in \[mm\]
    pub fn horizontal_accuracy_raw(&self) -> u32 {
        self.h_acc
    }

    /// Horizontal accuracy in \[m\]
    pub fn horizontal_accuracy(&self) -> f64 {
        f64::from(self.h_acc) * 1e-3
    }

    /// Vertical accuracy in \[mm\]
    pub fn vertical_accuracy_raw(&self) -> u32 {
        self.v_acc
    }

    /// Vertical accuracy in \[m\]
    pub fn vertical_accuracy(&self) -> f64 {
        f64::from(self.v_acc) * 1e-3
    }

    /// Velocity North component \[m/s\]
    pub fn vel_north(&self) -> f64 {
        f64::from(self.vel_north) * 1e-3
    }

    /// Velocity East component \[m/s\]
    pub fn vel_east(&self) -> f64 {
        f64::from(self.vel_east) * 1e-3
    }

    /// Velocity Down component \[m/s\]
    pub fn vel_down(&self) -> f64 {
        f64::from(self.vel_down) * 1e-3
    }

    /// Ground speed \[mm/s\]
    pub fn ground_speed_raw(&self) -> i32 {
        self.g_speed
    }

    /// Ground speed \[m/s\]
    pub fn ground_speed(&self) -> f64 {
        f64::from(self.g_speed) * 1e-3
    }

    /// Heading of motion 2-D \[deg * 1e-5\]
    pub fn heading_motion_raw(&self) -> i32 {
        self.head_motion
    }

    /// Heading of motion 2-D \[deg\]
    pub fn heading_degrees(&self) -> f64 {
        f64::from(self.head_motion) * 1e-5
    }

    /// Speed Accuracy Estimate \[m/s\]
    pub fn speed_accuracy(&self) -> f64 {
        f64::from(self.s_acc) * 1e-3
    }

    /// Heading accuracy estimate (for both vehicle and motion) \[deg\]
    pub fn heading_accuracy(&self) -> f64 {
        f64::from(self.head_acc) * 1e-5
    }

    /// Position DOP, scaled by 100
    pub fn pdop_raw(&self) -> u16 {
        self.pdop
    }

    /// Position DOP
    pub fn pdop(&self) -> f64 {
        f64::from(self.pdop) * 1e-2
    }

    /// Additional flags
    pub fn flags3(&self) -> NavPvtFlags3 {
        NavPvtFlags3::from(self.flags3)
    }

    /// Heading of vehicle (2-D), this is only valid when [HEAD_VEH_VALID](NavPvtFlags::HEAD_VEH_VALID) is set,
    /// otherwise the output is set to the heading of motion
    pub fn heading_vehicle(&self) -> f64 {
        f64::from(self.head_vehicle) * 1e-5
    }

    /// Magnetic declination \[deg\]
    pub fn magnetic_declination(&self) -> f64 {
        f64::from(self.magnetic_declination) * 1e-2
    }

    /// Magnetic declination accuracy \[deg\]
    pub fn magnetic_declination_accuracy(&self) -> f64 {
        f64::from(self.magnetic_declination_accuracy) * 1e-2
    }
}

/// GNSS fix Type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GnssFixType {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GPSPlusDeadReckoning,
    TimeOnlyFix,
    /// Code not assigned by the protocol
    Unknown(u8),
}

impl GnssFixType {
    pub const fn into_raw(self) -> u8 {
        match self {
            GnssFixType::NoFix => 0,
            GnssFixType::DeadReckoningOnly => 1,
            GnssFixType::Fix2D => 2,
            GnssFixType::Fix3D => 3,
            GnssFixType::GPSPlusDeadReckoning => 4,
            GnssFixType::TimeOnlyFix => 5,
            GnssFixType::Unknown(x) => x,
        }
    }

    /// Fix carries at least a horizontal position
    pub const fn has_position(self) -> bool {
        matches!(
            self,
            GnssFixType::Fix2D | GnssFixType::Fix3D | GnssFixType::GPSPlusDeadReckoning
        )
    }
}

impl From<u8> for GnssFixType {
    fn from(x: u8) -> Self {
        match x {
            0 => GnssFixType::NoFix,
            1 => GnssFixType::DeadReckoningOnly,
            2 => GnssFixType::Fix2D,
            3 => GnssFixType::Fix3D,
            4 => GnssFixType::GPSPlusDeadReckoning,
            5 => GnssFixType::TimeOnlyFix,
            x => GnssFixType::Unknown(x),
        }
    }
}

impl core::fmt::Display for GnssFixType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GnssFixType::NoFix => f.write_str("No Fix"),
            GnssFixType::DeadReckoningOnly => f.write_str("DR"),
            GnssFixType::Fix2D => f.write_str("2D Fix"),
            GnssFixType::Fix3D => f.write_str("3D Fix"),
            GnssFixType::GPSPlusDeadReckoning => f.write_str("3D + DR"),
            GnssFixType::TimeOnlyFix => f.write_str("Time Only"),
            GnssFixType::Unknown(x) => write!(f, "Unknown({})", x),
        }
    }
}

bitflags! {
    /// Fix status flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NavPvtFlags: u8 {
        /// 1 = Position and velocity valid and within DOP and accuracy masks
        const GPS_FIX_OK = 1;
        /// 1 = Differential corrections were applied; DGPS used
        const DIFF_SOLN = 2;
        /// 1 = Heading of vehicle is valid, only set if the receiver is in sensor fusion mode
        const HEAD_VEH_VALID = 0x20;
        /// 1 = Carrier phase range solution with floating ambiguities
        const CARR_SOLN_FLOAT = 0x40;
        /// 1 = Carrier phase range solution with fixed ambiguities
        const CARR_SOLN_FIXED = 0x80;
    }
}

bitflags! {
    /// Additional flags for `NavPvt`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NavPvtFlags2: u8 {
        /// 1 = information about UTC Date and Time of Day validity confirmation is available
        const CONFIRMED_AVAI = 0x20;
        /// 1 = UTC Date validity could be confirmed
        const CONFIRMED_DATE = 0x40;
        /// 1 = UTC Time of Day could be confirmed
        const CONFIRMED_TIME = 0x80;
    }
}

bitflags! {
    /// Validity flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct NavPvtValidFlags: u8 {
        /// 1 = valid UTC Date
        const VALID_DATE = 0x01;
        /// 1 = valid UTC time of day
        const VALID_TIME = 0x02;
        /// 1 = UTC time of day has been fully resolved (no seconds uncertainty).
        /// Cannot be used to check if time is completely solved.
        const FULLY_RESOLVED = 0x04;
        /// 1 = valid magnetic declination
        const VALID_MAG = 0x08;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPvtFlags3 {
    invalid_llh: bool,
    last_correction_age: u8,
}

impl NavPvtFlags3 {
    /// 1 = Invalid lon, lat, height and hMSL
    pub fn invalid_llh(&self) -> bool {
        self.invalid_llh
    }

    /// Age of the most recently received differential correction, as a bucket index:
    /// `0` not available, `1` under 1 s, up to `>=12` for 120 s and above
    pub fn last_correction_age(&self) -> u8 {
        self.last_correction_age
    }
}

impl From<u16> for NavPvtFlags3 {
    fn from(val: u16) -> Self {
        const LAST_CORRECTION_AGE_MASK: u16 = 0b0000_0000_0001_1110;
        let invalid_llh = val & 0x01 == 1;
        let last_correction_age = ((val & LAST_CORRECTION_AGE_MASK) >> 1) as u8; // bits 1–4
        Self {
            invalid_llh,
            last_correction_age,
        }
    }
}
