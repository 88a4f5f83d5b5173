//! See [`Framer`] for more details.

use log::{debug, warn};
use snafu::{ensure, Snafu};

use crate::buffer::PacketBuffer;
use crate::checksum::ChecksumKind;
use crate::commands;
use crate::frame::{self, Frame};
use crate::types::{Annotation, AnnotationClass, ByteEvent, SampleRange, UartEvent};

/// Error type for the framer.
///
/// Every variant signals a broken upstream contract or, under
/// [`ChecksumPolicy::Reject`], a corrupt packet. None of them poison the
/// framer: the offending packet is dropped and the next byte starts fresh.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeError {
    /// An event's sample range runs backwards.
    #[snafu(display("sample range runs backwards, start {} > end {}", start, end))]
    RangeReversed { start: u64, end: u64 },
    /// An event starts before the previous event ended.
    #[snafu(display("event timing not monotonic, start {} < previous end {}", start, prev_end))]
    TimeReversed { start: u64, prev_end: u64 },
    /// A completed packet failed checksum verification (reject policy only).
    #[snafu(display("packet rejected: {}", source))]
    BadChecksum { source: frame::Error },
}

/// What to do with a completed packet whose checksum does not verify.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum ChecksumPolicy {
    /// Annotate the packet anyway; the failure is logged and the checksum
    /// annotation is marked `(bad)`.
    Lenient,
    /// Drop the packet and report [`DecodeError::BadChecksum`].
    Reject,
}

/// Framer configuration.
///
/// The default matches a plain simple-checksum bus and the behavior of the
/// classic decoder: lenient on bad checksums, no inter-byte gap limit.
#[derive(Debug, Copy, Clone)]
pub struct FramerConfig {
    /// Integrity check the bus uses.
    pub checksum: ChecksumKind,
    /// What to do when the check fails.
    pub policy: ChecksumPolicy,
    /// Largest allowed gap, in samples, between consecutive bytes of one
    /// packet. ccTalk budgets 10 ms between bytes; a host that knows its
    /// sample rate can set this to abandon stalled packets. `None` disables
    /// the check.
    pub max_gap: Option<u64>,
}

impl Default for FramerConfig {
    fn default() -> Self {
        FramerConfig {
            checksum: ChecksumKind::Simple,
            policy: ChecksumPolicy::Lenient,
            max_gap: None,
        }
    }
}

/// Observable framing state, mostly useful to hosts and tests.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum FramerState {
    /// No packet in flight.
    Empty,
    /// Destination byte received, length byte pending.
    LenPending,
    /// Length known; collecting the remaining bytes.
    Accumulating {
        /// Bytes received so far.
        received: usize,
        /// Total packet length, fixed since the length byte.
        expected: usize,
    },
}

/// ccTalk packet framer.
///
/// Feed it one [`UartEvent`] at a time; it buffers data bytes until the
/// packet length declared in the second byte is reached, then interprets the
/// packet and returns the annotations for it. Each framer owns exactly one
/// in-flight packet; decode independent streams with independent framers.
///
/// # Example
///
/// ```
/// use cctalk_proto::{Framer, SampleRange, UartEvent};
///
/// # fn main() -> Result<(), cctalk_proto::DecodeError> {
/// // Latch output lines, addressed to 2, one data byte.
/// let capture = [0x02, 0x01, 0x01, 0xE9, 0x23, 0xF0];
///
/// let mut framer = Framer::default();
/// let mut annotations = Vec::new();
/// for (i, &byte) in capture.iter().enumerate() {
///     let start = i as u64 * 10;
///     let range = SampleRange::new(start, start + 8);
///     annotations.extend(framer.accept(UartEvent::Data(byte), range)?);
/// }
/// // Four header fields, one data byte, the checksum, and the summary.
/// assert_eq!(annotations.len(), 7);
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Framer {
    buffer: PacketBuffer,
    config: FramerConfig,
    prev_end: Option<u64>,
}

impl Default for Framer {
    fn default() -> Self {
        Framer::new(FramerConfig::default())
    }
}

impl Framer {
    /// Create a new framer with the given configuration.
    pub fn new(config: FramerConfig) -> Framer {
        Framer {
            buffer: PacketBuffer::new(),
            config,
            prev_end: None,
        }
    }

    /// Current framing state.
    pub fn state(&self) -> FramerState {
        match (self.buffer.len(), self.buffer.expected()) {
            (0, _) => FramerState::Empty,
            (1, 0) => FramerState::LenPending,
            (received, expected) => FramerState::Accumulating { received, expected },
        }
    }

    /// Drop any partially accumulated packet and forget the timing cursor.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.prev_end = None;
    }

    /// Accept one upstream event.
    ///
    /// Non-data events are ignored. Data bytes are buffered until the packet
    /// completes, at which point the annotations for the whole packet are
    /// returned and the framer is ready for the next packet. The returned
    /// vector is empty for every byte but the last one of a packet.
    ///
    /// # Errors
    ///
    /// Fails fast on timing that runs backwards (an upstream contract
    /// break), and reports corrupt packets when configured with
    /// [`ChecksumPolicy::Reject`]. The framer remains usable after any
    /// error.
    pub fn accept(
        &mut self,
        event: UartEvent,
        range: SampleRange,
    ) -> Result<Vec<Annotation>, DecodeError> {
        let value = match event {
            UartEvent::Data(value) => value,
            // Bit-level framing and line conditions carry nothing to decode.
            _ => return Ok(Vec::new()),
        };

        ensure!(
            range.start <= range.end,
            RangeReversedSnafu {
                start: range.start,
                end: range.end,
            }
        );
        if let Some(prev_end) = self.prev_end {
            ensure!(
                range.start >= prev_end,
                TimeReversedSnafu {
                    start: range.start,
                    prev_end,
                }
            );
            if let Some(max_gap) = self.config.max_gap {
                if !self.buffer.is_empty() && range.start - prev_end > max_gap {
                    warn!(
                        "inter-byte gap exceeded, abandoning packet after {} of {} bytes",
                        self.buffer.len(),
                        self.buffer.expected(),
                    );
                    self.buffer.clear();
                }
            }
        }
        self.prev_end = Some(range.end);

        self.buffer.push(ByteEvent { value, range });

        // The second byte declares the data length and thereby the total
        // packet length. Nothing is annotated until the packet completes.
        if self.buffer.len() == 2 {
            self.buffer.set_declared_length(value);
            return Ok(Vec::new());
        }

        if !self.buffer.is_complete() {
            return Ok(Vec::new());
        }

        let result = self.interpret();
        self.buffer.clear();
        result
    }

    fn interpret(&self) -> Result<Vec<Annotation>, DecodeError> {
        let bytes = self.buffer.values();
        // The buffer is drained at exactly the expected length, so the
        // structure parse cannot fail.
        let frame = frame::parse(&bytes).expect("BUG: completed buffer failed structure parse");

        let suspect = match frame.verify(self.config.checksum) {
            Ok(()) => false,
            Err(source) => {
                warn!("cmd {} packet: {}", frame.command, source);
                match self.config.policy {
                    ChecksumPolicy::Reject => return Err(DecodeError::BadChecksum { source }),
                    ChecksumPolicy::Lenient => true,
                }
            }
        };

        debug!(
            "packet complete: dst={} src={} cmd={} data={}B",
            frame.destination,
            frame.source,
            frame.command,
            frame.data.len(),
        );
        Ok(self.annotate(&frame, suspect))
    }

    fn annotate(&self, frame: &Frame<'_>, suspect: bool) -> Vec<Annotation> {
        let events = self.buffer.events();
        let field = |index: usize, class: AnnotationClass, label: String| Annotation {
            range: events[index].range,
            class,
            label,
        };
        let bad = if suspect { " (bad)" } else { "" };

        let mut out = Vec::with_capacity(events.len() + 1);
        out.push(field(
            0,
            AnnotationClass::Destination,
            format!("dst: {}", frame.destination),
        ));
        out.push(field(1, AnnotationClass::Length, format!("len: {}", frame.length)));
        out.push(match self.config.checksum {
            ChecksumKind::Simple => {
                field(2, AnnotationClass::Source, format!("src: {}", frame.source))
            }
            // Byte 2 is not a source address in CRC mode.
            ChecksumKind::Crc16 => field(
                2,
                AnnotationClass::Checksum,
                format!("crc lo: {}", frame.source),
            ),
        });
        out.push(field(3, AnnotationClass::Command, format!("cmd: {}", frame.command)));
        for (i, &byte) in frame.data.iter().enumerate() {
            out.push(field(4 + i, AnnotationClass::Data, format!("data: {}", byte)));
        }
        out.push(field(
            events.len() - 1,
            AnnotationClass::Checksum,
            match self.config.checksum {
                ChecksumKind::Simple => format!("csum: {}{}", frame.checksum, bad),
                ChecksumKind::Crc16 => format!("crc hi: {}{}", frame.checksum, bad),
            },
        ));

        let span = self.buffer.span().expect("BUG: completed buffer is empty");
        out.push(Annotation {
            range: span,
            class: AnnotationClass::Packet,
            label: format!("cmd {}: {}", frame.command, commands::describe(frame.command)),
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(framer: &mut Framer, bytes: &[u8]) -> Vec<Annotation> {
        let mut out = Vec::new();
        for (i, &byte) in bytes.iter().enumerate() {
            let start = i as u64 * 10;
            out.extend(
                framer
                    .accept(UartEvent::Data(byte), SampleRange::new(start, start + 8))
                    .unwrap(),
            );
        }
        out
    }

    #[test]
    fn state_transitions() {
        let mut framer = Framer::default();
        assert_eq!(framer.state(), FramerState::Empty);

        framer
            .accept(UartEvent::Data(0x02), SampleRange::new(0, 8))
            .unwrap();
        assert_eq!(framer.state(), FramerState::LenPending);

        framer
            .accept(UartEvent::Data(0x01), SampleRange::new(10, 18))
            .unwrap();
        assert_eq!(
            framer.state(),
            FramerState::Accumulating {
                received: 2,
                expected: 6,
            }
        );
    }

    #[test]
    fn completion_resets_to_empty() {
        let mut framer = Framer::default();
        let annotations = feed(&mut framer, &[0x02, 0x00, 0x01, 0xFE, 0xFF]);
        assert_eq!(annotations.len(), 6);
        assert_eq!(framer.state(), FramerState::Empty);
    }

    #[test]
    fn non_data_events_are_ignored() {
        let mut framer = Framer::default();
        for event in [
            UartEvent::StartBit,
            UartEvent::StopBit,
            UartEvent::ParityBit(true),
            UartEvent::Break,
            UartEvent::Idle,
        ]
        .iter()
        {
            let out = framer.accept(*event, SampleRange::new(0, 1)).unwrap();
            assert!(out.is_empty());
        }
        assert_eq!(framer.state(), FramerState::Empty);
    }

    #[test]
    fn backwards_range_is_rejected() {
        let mut framer = Framer::default();
        assert!(matches!(
            framer.accept(UartEvent::Data(0x02), SampleRange::new(10, 5)),
            Err(DecodeError::RangeReversed { start: 10, end: 5 })
        ));
    }

    #[test]
    fn time_reversal_is_rejected() {
        let mut framer = Framer::default();
        framer
            .accept(UartEvent::Data(0x02), SampleRange::new(0, 8))
            .unwrap();
        assert!(matches!(
            framer.accept(UartEvent::Data(0x00), SampleRange::new(4, 12)),
            Err(DecodeError::TimeReversed { start: 4, prev_end: 8 })
        ));
    }

    #[test]
    fn reject_policy_drops_corrupt_packet() {
        let mut framer = Framer::new(FramerConfig {
            policy: ChecksumPolicy::Reject,
            ..FramerConfig::default()
        });
        let mut result = Ok(Vec::new());
        for (i, &byte) in [0x02u8, 0x00, 0x03, 0x0A, 0xEF].iter().enumerate() {
            let start = i as u64 * 10;
            result = framer.accept(UartEvent::Data(byte), SampleRange::new(start, start + 8));
        }
        assert!(matches!(result, Err(DecodeError::BadChecksum { .. })));
        // The framer recovered and the next packet decodes normally.
        assert_eq!(framer.state(), FramerState::Empty);
    }
}
