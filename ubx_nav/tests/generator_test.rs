use ubx_nav::{
    checksum, nav_pvt_setup_commands, ubx_checksum, AlignmentToReferenceTime,
    CfgMsgAllPortsBuilder, CfgMsgSinglePortBuilder, CfgRateBuilder, NavPvt, NmeaSentence, PortId,
    UpdateRate,
};

const DISABLE_GLL: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0xF0, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2A,
];
const DISABLE_GSV: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0xF0, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x38,
];
const DISABLE_GSA: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0xF0, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x31,
];
const DISABLE_GGA: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x23,
];
const DISABLE_VTG: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0xF0, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x46,
];
const DISABLE_RMC: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0xF0, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x3F,
];
const ENABLE_NAV_PVT: [u8; 16] = [
    0xB5, 0x62, 0x06, 0x01, 0x08, 0x00, 0x01, 0x07, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x18, 0xE1,
];

#[test]
fn test_checksum_known_frames() {
    assert_eq!(
        checksum(
            0x06,
            0x01,
            0x08,
            0x00,
            &[0xF0, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        ),
        (0x00, 0x2A)
    );
    assert_eq!(
        checksum(0x06, 0x08, 0x06, 0x00, &[0xE8, 0x03, 0x01, 0x00, 0x01, 0x00]),
        (0x01, 0x39)
    );
    assert_eq!(ubx_checksum(&ENABLE_NAV_PVT[2..14]), (0x18, 0xE1));
}

#[test]
fn test_cfg_msg_disable_nmea() {
    let cases = [
        (NmeaSentence::Gll, DISABLE_GLL),
        (NmeaSentence::Gsv, DISABLE_GSV),
        (NmeaSentence::Gsa, DISABLE_GSA),
        (NmeaSentence::Gga, DISABLE_GGA),
        (NmeaSentence::Vtg, DISABLE_VTG),
        (NmeaSentence::Rmc, DISABLE_RMC),
    ];
    for (sentence, expected) in cases {
        assert_eq!(
            expected,
            CfgMsgAllPortsBuilder::disable_nmea(sentence).into_packet_bytes(),
            "{:?}",
            sentence
        );
    }
}

#[test]
fn test_cfg_msg_enable_nav_pvt() {
    assert_eq!(
        ENABLE_NAV_PVT,
        CfgMsgAllPortsBuilder::enable_on_port(0x01, 0x07, PortId::Uart1, 1).into_packet_bytes()
    );
    assert_eq!(
        ENABLE_NAV_PVT,
        CfgMsgAllPortsBuilder::set_rate_for::<NavPvt>([0, 1, 0, 0, 0, 0]).into_packet_bytes()
    );
    let bytes: [u8; 16] = CfgMsgAllPortsBuilder::disable(0xF0, 0x01).into();
    assert_eq!(DISABLE_GLL, bytes);
}

#[test]
fn test_cfg_msg_simple() {
    assert_eq!(
        [0xb5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x01, 0x07, 0x01, 0x13, 0x51],
        CfgMsgSinglePortBuilder::set_rate_for::<NavPvt>(1).into_packet_bytes()
    );
}

#[test]
fn test_setup_sequence() {
    assert_eq!(
        nav_pvt_setup_commands(),
        [
            DISABLE_GLL,
            DISABLE_GSV,
            DISABLE_GSA,
            DISABLE_GGA,
            DISABLE_VTG,
            DISABLE_RMC,
            ENABLE_NAV_PVT
        ]
    );
}

#[test]
fn test_cfg_rate_presets() {
    let cases: [(UpdateRate, [u8; 14]); 4] = [
        (
            UpdateRate::Hz1,
            [0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0xE8, 0x03, 0x01, 0x00, 0x01, 0x00, 0x01, 0x39],
        ),
        (
            UpdateRate::Hz2,
            [0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0xF4, 0x01, 0x01, 0x00, 0x01, 0x00, 0x0B, 0x77],
        ),
        (
            UpdateRate::Hz5,
            [0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0xC8, 0x00, 0x01, 0x00, 0x01, 0x00, 0xDE, 0x6A],
        ),
        (
            UpdateRate::Hz10,
            [0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0x64, 0x00, 0x01, 0x00, 0x01, 0x00, 0x7A, 0x12],
        ),
    ];
    for (rate, expected) in cases {
        assert_eq!(
            expected,
            CfgRateBuilder::from(rate).into_packet_bytes(),
            "{:?}",
            rate
        );
    }
}

#[test]
fn test_cfg_rate_manual() {
    assert_eq!(
        [0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0xE8, 0x03, 0x01, 0x00, 0x01, 0x00, 0x01, 0x39],
        CfgRateBuilder {
            measure_rate_ms: 1000,
            nav_rate: 1,
            time_ref: AlignmentToReferenceTime::Gps,
        }
        .into_packet_bytes()
    );
}

#[cfg(feature = "alloc")]
#[test]
fn test_build_message_matches_builders() {
    use ubx_nav::build_message;

    assert_eq!(
        build_message(0x06, 0x01, &DISABLE_RMC[6..14]).unwrap(),
        DISABLE_RMC.to_vec()
    );
    assert_eq!(
        build_message(0x06, 0x08, &[0x64, 0x00, 0x01, 0x00, 0x01, 0x00]).unwrap(),
        CfgRateBuilder::from(UpdateRate::Hz10)
            .into_packet_bytes()
            .to_vec()
    );
}
