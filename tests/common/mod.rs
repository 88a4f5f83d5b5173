#![allow(dead_code)]

use cctalk_proto::{crc16, csum8, Annotation, DecodeError, Framer, SampleRange, UartEvent};

/// Samples per byte slot in a fabricated capture.
pub const SLOT: u64 = 10;
const BYTE_WIDTH: u64 = 8;

/// Fabricates a UART capture: a sequence of events with advancing sample
/// offsets, ten samples per byte slot with the byte occupying the first
/// eight. Packet builders compute valid trailers so tests only spell out
/// corrupt ones explicitly.
pub struct Capture {
    events: Vec<(UartEvent, SampleRange)>,
    cursor: u64,
}

impl Capture {
    pub fn new() -> Capture {
        Capture {
            events: Vec::new(),
            cursor: 0,
        }
    }

    /// Append raw data bytes.
    pub fn data(&mut self, bytes: &[u8]) -> &mut Capture {
        for &byte in bytes {
            let range = SampleRange::new(self.cursor, self.cursor + BYTE_WIDTH);
            self.events.push((UartEvent::Data(byte), range));
            self.cursor += SLOT;
        }
        self
    }

    /// Append a non-data event occupying a single sample.
    pub fn event(&mut self, event: UartEvent) -> &mut Capture {
        let range = SampleRange::new(self.cursor, self.cursor + 1);
        self.events.push((event, range));
        self.cursor += 1;
        self
    }

    /// Advance the sample cursor without emitting anything.
    pub fn quiet(&mut self, samples: u64) -> &mut Capture {
        self.cursor += samples;
        self
    }

    /// Append a well-formed simple-checksum packet.
    pub fn packet(&mut self, dst: u8, src: u8, command: u8, data: &[u8]) -> &mut Capture {
        let mut bytes = vec![dst, data.len() as u8, src, command];
        bytes.extend_from_slice(data);
        bytes.push(0u8.wrapping_sub(csum8(&bytes)));
        self.data(&bytes)
    }

    /// Append a well-formed CRC-16 packet.
    pub fn crc_packet(&mut self, dst: u8, command: u8, data: &[u8]) -> &mut Capture {
        let len = data.len() as u8;
        let mut covered = vec![dst, len, command];
        covered.extend_from_slice(data);
        let crc = crc16(&covered);

        let mut bytes = vec![dst, len, crc as u8, command];
        bytes.extend_from_slice(data);
        bytes.push((crc >> 8) as u8);
        self.data(&bytes)
    }

    /// Run the capture through `framer`, collecting all annotations.
    pub fn feed(&self, framer: &mut Framer) -> Result<Vec<Annotation>, DecodeError> {
        let mut out = Vec::new();
        for &(event, range) in &self.events {
            out.extend(framer.accept(event, range)?);
        }
        Ok(out)
    }
}
