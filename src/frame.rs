//! Structure parser and integrity checks for a completed ccTalk packet.
//!
//! A packet on the wire is `[dst, len, src, cmd, data.., csum]`, with `len`
//! declaring the data byte count. [`parse`] destructures a completed buffer
//! into a [`Frame`] view; [`Frame::verify`] applies whichever integrity
//! check the bus is configured for.

use nom::bytes::streaming::take;
use nom::number::streaming::u8;
use nom::IResult;
use snafu::{ensure, Snafu};

use crate::checksum::{crc16_step, ChecksumKind};

type Buf = [u8];

/// Error type for packet structure and integrity checks.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The buffer ends before the declared packet length.
    #[snafu(display("packet truncated before declared end"))]
    Truncated,
    /// Bytes remain after the declared packet end.
    #[snafu(display("{} trailing bytes after packet end", count))]
    TrailingBytes { count: usize },
    /// Simple checksum over the whole packet is nonzero.
    #[snafu(display("simple checksum mismatch, packet sums to {:#04x}", residue))]
    ChecksumResidue { residue: u8 },
    /// The embedded CRC-16 does not match the computed value.
    #[snafu(display("CRC-16 mismatch, stored {:#06x} != computed {:#06x}", stored, computed))]
    CrcMismatch { stored: u16, computed: u16 },
}

/// Read-only view of a completed packet.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Frame<'a> {
    /// Destination address, byte 0.
    pub destination: u8,
    /// Declared data length, byte 1.
    pub length: u8,
    /// Source address, byte 2. Carries the CRC low byte in CRC-16 mode.
    pub source: u8,
    /// Command code, byte 3.
    pub command: u8,
    /// Data payload, `length` bytes. May be empty.
    pub data: &'a [u8],
    /// Trailing checksum byte. Carries the CRC high byte in CRC-16 mode.
    pub checksum: u8,
}

fn packet(buf: &Buf) -> IResult<&Buf, Frame<'_>> {
    let (buf, destination) = u8(buf)?;
    let (buf, length) = u8(buf)?;
    let (buf, source) = u8(buf)?;
    let (buf, command) = u8(buf)?;
    let (buf, data) = take(length)(buf)?;
    let (buf, checksum) = u8(buf)?;
    Ok((
        buf,
        Frame {
            destination,
            length,
            source,
            command,
            data,
            checksum,
        },
    ))
}

/// Parse one complete packet from `buf`.
///
/// The slice must hold exactly one packet; a short buffer yields
/// [`Error::Truncated`] and leftover bytes yield [`Error::TrailingBytes`].
pub fn parse(buf: &Buf) -> Result<Frame<'_>, Error> {
    match packet(buf) {
        Ok((rest, frame)) => {
            ensure!(rest.is_empty(), TrailingBytesSnafu { count: rest.len() });
            Ok(frame)
        }
        // The byte-level parsers only fail by running out of input.
        Err(_) => TruncatedSnafu.fail(),
    }
}

impl Frame<'_> {
    /// Check packet integrity in the given checksum mode.
    ///
    /// Simple mode requires the whole packet to sum to zero mod 256. CRC
    /// mode recomputes the CRC-16 over destination, length, command and
    /// data, and compares it against the pair embedded in the source and
    /// checksum slots.
    pub fn verify(&self, kind: ChecksumKind) -> Result<(), Error> {
        match kind {
            ChecksumKind::Simple => {
                let header = [
                    self.destination,
                    self.length,
                    self.source,
                    self.command,
                    self.checksum,
                ];
                let residue = header
                    .iter()
                    .chain(self.data)
                    .fold(0u8, |sum, byte| sum.wrapping_add(*byte));
                ensure!(residue == 0, ChecksumResidueSnafu { residue });
            }
            ChecksumKind::Crc16 => {
                let mut computed = 0;
                for &byte in [self.destination, self.length, self.command]
                    .iter()
                    .chain(self.data)
                {
                    computed = crc16_step(computed, byte);
                }
                let stored = u16::from(self.checksum) << 8 | u16::from(self.source);
                ensure!(stored == computed, CrcMismatchSnafu { stored, computed });
            }
        }
        Ok(())
    }
}
