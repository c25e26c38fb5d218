use super::nav_pvt::NavPvt;
use crate::error::DateTimeError;
use chrono::prelude::*;
use core::convert::TryFrom;

/// Represents a world position, can be constructed from a NavPvt solution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in degrees
    pub lon: f64,

    /// Latitude in degrees
    pub lat: f64,

    /// Altitude above mean sea level in meters
    pub alt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    /// m/s over the ground
    pub speed: f64,

    /// Heading in degrees
    pub heading: f64, // degrees
}

impl From<&NavPvt> for Position {
    fn from(packet: &NavPvt) -> Self {
        Position {
            lon: packet.lon_degrees(),
            lat: packet.lat_degrees(),
            alt: packet.height_msl(),
        }
    }
}

impl From<&NavPvt> for Velocity {
    fn from(packet: &NavPvt) -> Self {
        Velocity {
            speed: packet.ground_speed(),
            heading: packet.heading_degrees(),
        }
    }
}

impl TryFrom<&NavPvt> for DateTime<Utc> {
    type Error = DateTimeError;
    fn try_from(sol: &NavPvt) -> Result<Self, Self::Error> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(sol.year()),
            u32::from(sol.month()),
            u32::from(sol.day()),
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(
            u32::from(sol.hour()),
            u32::from(sol.min()),
            u32::from(sol.sec()),
        )
        .ok_or(DateTimeError::InvalidTime)?;
        const NANOS_LIM: u32 = 1_000_000_000;
        if sol.nanosecond().unsigned_abs() >= NANOS_LIM {
            return Err(DateTimeError::InvalidNanoseconds);
        }

        let dt = NaiveDateTime::new(date, time)
            + chrono::Duration::nanoseconds(i64::from(sol.nanosecond()));

        Ok(DateTime::from_naive_utc_and_offset(dt, Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvt(edit: impl FnOnce(&mut [u8; NavPvt::PAYLOAD_LEN])) -> NavPvt {
        let mut p = [0u8; NavPvt::PAYLOAD_LEN];
        p[4..6].copy_from_slice(&2021u16.to_le_bytes());
        p[6] = 3;
        p[7] = 14;
        p[8] = 1;
        p[9] = 59;
        p[10] = 26;
        edit(&mut p);
        NavPvt::from_payload(&p).unwrap()
    }

    #[test]
    fn datetime_with_negative_nanos() {
        let sol = pvt(|p| p[16..20].copy_from_slice(&(-500_000_000i32).to_le_bytes()));
        let dt = DateTime::<Utc>::try_from(&sol).unwrap();
        assert_eq!(
            dt,
            Utc.with_ymd_and_hms(2021, 3, 14, 1, 59, 25).unwrap()
                + chrono::Duration::milliseconds(500)
        );
    }

    #[test]
    fn invalid_calendar_fields() {
        let sol = pvt(|p| p[6] = 13);
        assert_eq!(
            DateTime::<Utc>::try_from(&sol),
            Err(DateTimeError::InvalidDate)
        );
        let sol = pvt(|p| p[8] = 24);
        assert_eq!(
            DateTime::<Utc>::try_from(&sol),
            Err(DateTimeError::InvalidTime)
        );
        let sol = pvt(|p| p[16..20].copy_from_slice(&1_000_000_000i32.to_le_bytes()));
        assert_eq!(
            DateTime::<Utc>::try_from(&sol),
            Err(DateTimeError::InvalidNanoseconds)
        );
    }

    #[test]
    fn position_and_velocity() {
        let sol = pvt(|p| {
            p[24..28].copy_from_slice(&100_000_000i32.to_le_bytes());
            p[28..32].copy_from_slice(&(-450_000_000i32).to_le_bytes());
            p[36..40].copy_from_slice(&1_250i32.to_le_bytes());
            p[60..64].copy_from_slice(&2_000i32.to_le_bytes());
            p[64..68].copy_from_slice(&18_000_000i32.to_le_bytes());
        });
        let pos = Position::from(&sol);
        assert!((pos.lon - 10.0).abs() < 1e-9);
        assert!((pos.lat + 45.0).abs() < 1e-9);
        assert!((pos.alt - 1.25).abs() < 1e-9);
        let vel = Velocity::from(&sol);
        assert!((vel.speed - 2.0).abs() < 1e-9);
        assert!((vel.heading - 180.0).abs() < 1e-9);
    }
}
