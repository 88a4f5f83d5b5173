use anyhow::Result;

use cctalk_proto::{Framer, SampleRange, UartEvent};

// A short exchange with a coin acceptor at address 2: the master polls, the
// acceptor ACKs, then the master reads the credit buffer and gets the event
// counter plus five result pairs back.
const CAPTURE: &[u8] = &[
    0x02, 0x00, 0x01, 0xFE, 0xFF, // master -> 2: simple poll
    0x01, 0x00, 0x02, 0x00, 0xFD, // 2 -> master: reply
    0x02, 0x00, 0x01, 0xE5, 0x18, // master -> 2: read buffered credit or error codes
    0x01, 0x0B, 0x02, 0x00, 0x05, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xEB, // 2 -> master: one coin accepted, rest of the buffer empty
];

fn main() -> Result<()> {
    env_logger::init();

    let mut framer = Framer::default();
    for (i, &byte) in CAPTURE.iter().enumerate() {
        let start = i as u64 * 10;
        let range = SampleRange::new(start, start + 8);
        for ann in framer.accept(UartEvent::Data(byte), range)? {
            println!(
                "{:>6}..{:<6} [{}] {}",
                ann.range.start,
                ann.range.end,
                ann.class.index(),
                ann.label
            );
        }
    }
    Ok(())
}
