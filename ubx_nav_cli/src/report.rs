use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde_json::json;
use ubx_nav::{Clock, Frame, NavigationFix, Receiver};

/// Text block printed after every decoded message
pub fn write_report<C: Clock, W: Write>(
    out: &mut W,
    receiver: &Receiver<C>,
    frame: &Frame,
) -> io::Result<()> {
    writeln!(
        out,
        "Message#: {} (class 0x{:02x} id 0x{:02x}, {} bytes)",
        receiver.message_number(),
        frame.class(),
        frame.msg_id(),
        frame.payload().len()
    )?;
    writeln!(out, "Fix#: {}", receiver.fix_number())?;
    writeln!(
        out,
        "Is a Valid Location: {}",
        receiver.is_valid_fix_position()
    )?;

    let Some(fix) = receiver.last_fix() else {
        return writeln!(out, "No fix yet");
    };
    let pvt = fix.pvt();
    writeln!(out, "FixType: {} ({})", pvt.fix_type(), pvt.fix_type_raw())?;
    writeln!(out, "Valid bits: {:#010b}", pvt.valid_raw())?;
    match receiver.position_fix_age() {
        Some(age) => writeln!(out, "PositionFixAge: {} ms", age.as_millis())?,
        None => writeln!(out, "PositionFixAge: unknown")?,
    }
    writeln!(
        out,
        "Time: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        pvt.year(),
        pvt.month(),
        pvt.day(),
        pvt.hour(),
        pvt.min(),
        pvt.sec()
    )?;
    writeln!(
        out,
        "Pos: {:.7}, {:.7}",
        pvt.lat_degrees(),
        pvt.lon_degrees()
    )?;
    writeln!(out, "Alt: {:.3} m", pvt.height_msl())?;
    writeln!(
        out,
        "hAcc: {:.3} m, vAcc: {:.3} m",
        pvt.horizontal_accuracy(),
        pvt.vertical_accuracy()
    )?;
    writeln!(out, "DOP: {:.2}", pvt.pdop())?;
    writeln!(out, "Speed: {:.3} m/s", pvt.ground_speed())?;
    writeln!(out, "Course: {:.5} deg", pvt.heading_degrees())?;
    writeln!(out, "Satellites: {}", pvt.num_satellites())
}

/// One JSON object per solution
pub fn json_report(fix: &NavigationFix, valid_position: bool) -> serde_json::Value {
    let time = fix
        .datetime()
        .ok()
        .map(|dt: DateTime<Utc>| dt.to_rfc3339());
    json!({
        "fix_number": fix.fix_number(),
        "valid_position": valid_position,
        "time": time,
        "position": fix.position(),
        "velocity": fix.velocity(),
        "pvt": fix.pvt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubx_nav::{build_message, NavPvt, UbxPacketMeta};

    fn nav_pvt_frame_bytes() -> Vec<u8> {
        let mut payload = vec![0u8; NavPvt::PAYLOAD_LEN];
        payload[4..6].copy_from_slice(&2019u16.to_le_bytes());
        payload[6] = 7;
        payload[7] = 4;
        payload[8] = 12;
        payload[11] = 0x05;
        payload[20] = 3;
        payload[23] = 10;
        payload[28..32].copy_from_slice(&515_000_000i32.to_le_bytes());
        payload[76..78].copy_from_slice(&123u16.to_le_bytes());
        build_message(NavPvt::CLASS, NavPvt::ID, &payload).unwrap()
    }

    fn report_string(receiver: &Receiver, frame: &Frame) -> String {
        let mut out = Vec::new();
        write_report(&mut out, receiver, frame).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn report_before_and_after_fix() {
        let mut receiver = Receiver::default();
        let ack = [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x01, 0x0f, 0x38];
        let frame = ack.iter().find_map(|&b| receiver.feed(b)).unwrap();
        let report = report_string(&receiver, &frame);
        assert!(report.starts_with("Message#: 1 (class 0x05 id 0x01, 2 bytes)\n"));
        assert!(report.contains("No fix yet"));

        let frame = nav_pvt_frame_bytes()
            .into_iter()
            .find_map(|b| receiver.feed(b))
            .unwrap();
        let report = report_string(&receiver, &frame);
        assert!(report.contains("Fix#: 1\n"));
        assert!(report.contains("Is a Valid Location: true\n"));
        assert!(report.contains("FixType: 3D Fix (3)\n"));
        assert!(report.contains("Valid bits: 0b00000101\n"));
        assert!(report.contains("Time: 2019-07-04 12:00:00\n"));
        assert!(report.contains("Pos: 51.5000000, 0.0000000\n"));
        assert!(report.contains("DOP: 1.23\n"));
        assert!(report.contains("Satellites: 10\n"));
    }

    #[test]
    fn json_contains_pvt() {
        let mut receiver = Receiver::default();
        receiver.feed_all(&nav_pvt_frame_bytes());
        let fix = receiver.last_fix().unwrap();
        let value = json_report(fix, receiver.is_valid_fix_position());
        assert_eq!(value["fix_number"], 1);
        assert_eq!(value["valid_position"], true);
        assert_eq!(value["time"], "2019-07-04T12:00:00+00:00");
        assert_eq!(value["pvt"]["num_satellites"], 10);
        let lat = value["position"]["lat"].as_f64().unwrap();
        assert!((lat - 51.5).abs() < 1e-9);
    }
}
