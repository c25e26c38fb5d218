/// UBX [Fletcher-16 checksum](https://en.wikipedia.org/wiki/Fletcher%27s_checksum) calculator supporting both streaming and single-shot use
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UbxChecksumCalc {
    ck_a: u8,
    ck_b: u8,
}

impl UbxChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { ck_a: 0, ck_b: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.ck_a = self.ck_a.wrapping_add(byte);
        self.ck_b = self.ck_b.wrapping_add(self.ck_a);
    }

    /// Get the current checksum result
    pub(crate) const fn result(self) -> (u8, u8) {
        (self.ck_a, self.ck_b)
    }

    #[cfg(any(feature = "alloc", test))]
    pub(crate) const fn is_valid(&self, received_ck_a: u8, received_ck_b: u8) -> bool {
        self.ck_a == received_ck_a && self.ck_b == received_ck_b
    }
}

/// Checksum over a contiguous `class, id, length, payload` slice
pub const fn ubx_checksum(data: &[u8]) -> (u8, u8) {
    let mut calc = UbxChecksumCalc::new();
    calc.update(data);
    calc.result()
}

/// Checksum of a frame given its header fields and payload, sync characters excluded.
pub const fn checksum(class: u8, msg_id: u8, len_lo: u8, len_hi: u8, payload: &[u8]) -> (u8, u8) {
    let mut calc = UbxChecksumCalc::new();
    calc.update(&[class, msg_id, len_lo, len_hi]);
    calc.update(payload);
    calc.result()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACK_LEN: u8 = 2;
    const VALID_CK_A: u8 = 0x11;
    const VALID_CK_B: u8 = 0x38;
    // UBX-ACK-ACK packet: Class=0x05, ID=0x01, Length=0x0002, Payload=[0x04, 0x05], Checksum=[0x11, 0x38]
    const VALID_UBX_PACKET: [u8; 10] = [
        crate::constants::UBX_SYNC_CHAR_1,
        crate::constants::UBX_SYNC_CHAR_2, // Sync chars (not included in checksum)
        0x05,
        0x01, // Class and Message ID
        PACK_LEN,
        0x00, // Length (2 bytes)
        0x04,
        0x05, // Payload
        VALID_CK_A,
        VALID_CK_B, // Checksum
    ];

    #[test]
    fn test_streaming_checksum_valid() {
        let mut calc = UbxChecksumCalc::new();

        // Update with class, message ID, length, and payload
        calc.update(&VALID_UBX_PACKET[2..8]);

        assert!(calc.is_valid(VALID_UBX_PACKET[8], VALID_UBX_PACKET[9]));
    }

    #[test]
    fn test_streaming_checksum_invalid() {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&VALID_UBX_PACKET[2..8]);

        assert!(!calc.is_valid(VALID_CK_A, VALID_CK_B.wrapping_add(1)));
        assert!(!calc.is_valid(VALID_CK_A.wrapping_add(1), VALID_CK_B));
    }

    #[test]
    fn test_streaming_checksum_incremental() {
        let mut calc = UbxChecksumCalc::new();

        // Update byte by byte to test incremental calculation
        for byte in &VALID_UBX_PACKET[2..8] {
            calc.update_byte(*byte);
        }

        assert_eq!(calc.result(), (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_streaming_checksum_chunks() {
        let mut calc = UbxChecksumCalc::new();

        // Update in chunks
        calc.update(&VALID_UBX_PACKET[2..4]); // Class and ID
        calc.update(&VALID_UBX_PACKET[4..6]); // Length
        calc.update(&VALID_UBX_PACKET[6..8]); // Payload

        assert_eq!(calc.result(), (VALID_CK_A, VALID_CK_B));
    }

    #[test]
    fn test_checksum_matches_slice_checksum() {
        assert_eq!(
            checksum(0x05, 0x01, PACK_LEN, 0x00, &[0x04, 0x05]),
            ubx_checksum(&VALID_UBX_PACKET[2..8])
        );
    }

    #[test]
    fn test_empty_payload_checksum() {
        // Class, ID, Length only
        let (ck_a, ck_b) = checksum(0x05, 0x00, 0x00, 0x00, &[]);
        assert_eq!((ck_a, ck_b), (0x05, 0x14));
    }

    #[test]
    fn test_cfg_msg_disable_gll_checksum() {
        assert_eq!(
            checksum(0x06, 0x01, 0x08, 0x00, &[0xf0, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
            (0x00, 0x2a)
        );
    }

    #[test]
    fn test_cfg_rate_1hz_checksum() {
        assert_eq!(
            checksum(0x06, 0x08, 0x06, 0x00, &[0xe8, 0x03, 0x01, 0x00, 0x01, 0x00]),
            (0x01, 0x39)
        );
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(
            ubx_checksum(&[0x01, 0x02, 0x00, 0x00]),
            ubx_checksum(&[0x02, 0x01, 0x00, 0x00])
        );
    }

    // Compute checksum at compile time
    #[allow(dead_code, reason = "constant time evaluated")]
    const fn is_checksum_valid(bytes: &[u8], expected_ck_a: u8, expected_ck_b: u8) -> bool {
        let mut calc = UbxChecksumCalc::new();
        calc.update(bytes);
        calc.is_valid(expected_ck_a, expected_ck_b)
    }

    #[test]
    fn test_const_checksum_computation() {
        // Compile-time assertion
        const _: () = {
            assert!(is_checksum_valid(
                &[
                    0x05, 0x01, // Class and Message ID
                    PACK_LEN, 0x00, // Length (2 bytes)
                    0x04, 0x05, // Payload
                ],
                VALID_CK_A,
                VALID_CK_B
            ));
        };
    }
}
