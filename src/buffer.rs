use arrayvec::ArrayVec;

use crate::types::{ByteEvent, SampleRange};

/// Largest possible ccTalk frame: header (2) + 255 data bytes + trailer (3).
pub(crate) const MAX_FRAME_LEN: usize = 2 + 255 + 3;

/// Accumulation buffer for one in-flight packet.
///
/// `expected` is zero until the length byte arrives, after which it is fixed
/// at `declared + 5` for the remainder of the packet. The framer drains the
/// buffer at exactly `expected` bytes, so the fixed capacity can never be
/// exceeded.
#[derive(Debug)]
pub(crate) struct PacketBuffer {
    events: ArrayVec<ByteEvent, MAX_FRAME_LEN>,
    expected: usize,
}

impl PacketBuffer {
    pub fn new() -> PacketBuffer {
        PacketBuffer {
            events: ArrayVec::new(),
            expected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total packet length, or 0 while the length byte is still pending.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Append one byte event. Panics if the invariant above is broken.
    pub fn push(&mut self, event: ByteEvent) {
        self.events.push(event);
    }

    /// Record the declared data length from the second packet byte.
    pub fn set_declared_length(&mut self, declared: u8) {
        self.expected = usize::from(declared) + 5;
    }

    pub fn is_complete(&self) -> bool {
        self.expected != 0 && self.events.len() == self.expected
    }

    /// Raw byte values, in arrival order.
    pub fn values(&self) -> ArrayVec<u8, MAX_FRAME_LEN> {
        self.events.iter().map(|event| event.value).collect()
    }

    pub fn events(&self) -> &[ByteEvent] {
        &self.events
    }

    /// Span from the first byte's start to the last byte's end.
    pub fn span(&self) -> Option<SampleRange> {
        let first = self.events.first()?;
        let last = self.events.last()?;
        Some(SampleRange::new(first.range.start, last.range.end))
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.expected = 0;
    }
}
