//! ccTalk integrity checks: the 8-bit additive checksum used by "simple"
//! packets and the CRC-16 used by "standard" CRC packets.

/// Checksum mode of a ccTalk bus.
///
/// Which mode a peripheral speaks is bus configuration; it is never inferred
/// from packet content.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum ChecksumKind {
    /// 8-bit additive checksum; a valid packet sums to zero mod 256.
    Simple,
    /// CRC-16 poly 0x1021, low byte carried in the source-address slot,
    /// high byte in the checksum slot.
    Crc16,
}

/// CRC-16/CCITT polynomial.
const CRC_POLY: u16 = 0x1021;

/// 8-bit additive checksum over `data`.
///
/// A well-formed simple packet, checksum byte included, sums to zero.
pub fn csum8(data: &[u8]) -> u8 {
    data.iter().fold(0, |sum, byte| sum.wrapping_add(*byte))
}

/// CRC-16 over `data`: poly 0x1021, initial value 0, no reflection
/// (the XMODEM variant, which is what ccTalk specifies).
pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(0, |acc, byte| crc16_step(acc, *byte))
}

/// Fold one byte into a running CRC-16 accumulator.
pub(crate) fn crc16_step(acc: u16, byte: u8) -> u16 {
    let mut acc = acc ^ (u16::from(byte) << 8);
    for _ in 0..8 {
        acc = if acc & 0x8000 != 0 {
            (acc << 1) ^ CRC_POLY
        } else {
            acc << 1
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::{crc16, csum8};

    #[test]
    fn csum8_empty_is_zero() {
        assert_eq!(csum8(&[]), 0);
    }

    #[test]
    fn csum8_wraps_mod_256() {
        assert_eq!(csum8(&[0xFF, 0x01]), 0);
        assert_eq!(csum8(&[0x80, 0x80, 0x01]), 1);
    }

    #[test]
    fn csum8_is_order_independent() {
        let forward = [0x02, 0x00, 0x01, 0xFE];
        let mut reversed = forward;
        reversed.reverse();
        assert_eq!(csum8(&forward), csum8(&reversed));
    }

    #[test]
    fn csum8_valid_packet_sums_to_zero() {
        // Simple poll to address 2, as seen on a real bus.
        assert_eq!(csum8(&[0x02, 0x00, 0x01, 0xFE, 0xFF]), 0);
    }

    // Golden vectors, pinned once rather than re-derived.
    #[test]
    fn crc16_golden_vectors() {
        assert_eq!(crc16(&[]), 0x0000);
        assert_eq!(crc16(&[0x00]), 0x0000);
        assert_eq!(crc16(&[0x01]), 0x1021);
        // CRC-16/XMODEM check value.
        assert_eq!(crc16(b"123456789"), 0x31C3);
    }
}
