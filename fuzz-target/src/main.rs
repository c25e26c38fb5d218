#[macro_use]
extern crate afl;
extern crate ubx_nav;

use ubx_nav::{PacketRef, ParserBuilder, Receiver};

fn parse(max_payload_len: usize, chunksize: usize, data: &[u8]) {
    let mut parser = ParserBuilder::new()
        .with_max_payload_len(max_payload_len)
        .build();
    for chunk in data.chunks(chunksize) {
        for event in parser.consume(chunk) {
            match event {
                Ok(frame) => {
                    assert!(frame.payload().len() <= max_payload_len);
                    // Decoding may fail on short payloads, it must not panic
                    let _ = frame.packet();
                },
                Err(_) => {
                    // The input might contain any of a variety of errors
                },
            }
        }
    }

    // Whatever state the garbage left behind, a reset parser finds the next frame
    parser.reset();
    let ack_ack = [0xb5, 0x62, 0x5, 0x1, 0x2, 0x0, 0x4, 0x5, 0x11, 0x38];
    let mut it = parser.consume(&ack_ack);
    match it.next() {
        Some(Ok(frame)) => match frame.packet() {
            Ok(PacketRef::AckAck(ack)) => {
                assert_eq!((ack.class(), ack.msg_id()), (4, 5));
            },
            other => panic!("expected AckAck, got {:?}", other),
        },
        other => panic!("expected a frame, got {:?}", other),
    }
    assert!(it.next().is_none());
}

fn track(data: &[u8]) {
    let mut receiver = Receiver::default();
    let frames = receiver.feed_all(data);
    assert!(receiver.fix_number() <= receiver.message_number());
    assert_eq!(receiver.message_number() as usize, frames);
    assert_eq!(receiver.last_fix().is_none(), receiver.position_fix_age().is_none());
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let max_payload_len = (data[0] as usize * 4).max(2);
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                parse(max_payload_len, chunksize, &data[2..]);
            }
            track(&data[2..]);
        }
    });
}
