use super::{ByteSource, PlayerErrorKind, ReadResult, TrackReader};

/// Longest quantity accepted by strict decoding.
///
/// Five groups of seven bits already overflow a `u32`.
pub const MAX_VLQ_BYTES: usize = 5;

impl<S: ByteSource> TrackReader<'_, S> {
    /// Decode a variable length quantity starting at the next byte.
    ///
    /// A spent track yields `0`, like any other over-read.
    pub fn read_vlq(&mut self, strict: bool) -> ReadResult<u32> {
        let first = self.next_byte()?;
        self.read_vlq_from(first, strict)
    }

    /// Finish a variable length quantity whose first byte was already read.
    ///
    /// Each byte contributes its low seven bits, most significant group
    /// first, for as long as the high bit is set. With `strict`, a sixth
    /// byte fails with [`PlayerErrorKind::MalformedVlq`]; otherwise bits
    /// shifted past 32 are dropped and decoding continues until a byte
    /// without the continuation bit, or the end of the track.
    pub fn read_vlq_from(&mut self, first: u8, strict: bool) -> ReadResult<u32> {
        let mut value = (first & 0x7F) as u32;
        let mut byte = first;
        let mut count = 1;
        while byte & 0x80 != 0 {
            if strict && count >= MAX_VLQ_BYTES {
                return Err(self.error(PlayerErrorKind::MalformedVlq));
            }
            byte = self.next_byte()?;
            value = (value << 7) | (byte & 0x7F) as u32;
            count += 1;
        }
        Ok(value)
    }
}

#[cfg(test)]
pub(crate) fn encode_vlq(mut value: u32) -> alloc::vec::Vec<u8> {
    let mut bytes = alloc::vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes.reverse();
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{Reader, SliceSource};
    use pretty_assertions::assert_eq;

    fn decode(bytes: &[u8], strict: bool) -> ReadResult<u32> {
        let mut reader = Reader::new(SliceSource::new(bytes));
        let mut track = reader.track(0, bytes.len() as u32);
        track.read_vlq(strict)
    }

    #[test]
    fn known_encodings() {
        assert_eq!(decode(&[0x00], true).unwrap(), 0);
        assert_eq!(decode(&[0x40], true).unwrap(), 0x40);
        assert_eq!(decode(&[0x7F], true).unwrap(), 0x7F);
        assert_eq!(decode(&[0x81, 0x00], true).unwrap(), 0x80);
        assert_eq!(decode(&[0xC0, 0x00], true).unwrap(), 0x2000);
        assert_eq!(decode(&[0xFF, 0x7F], true).unwrap(), 0x3FFF);
        assert_eq!(decode(&[0x81, 0x80, 0x00], true).unwrap(), 0x4000);
        assert_eq!(decode(&[0xFF, 0xFF, 0xFF, 0x7F], true).unwrap(), 0x0FFF_FFFF);
    }

    #[test]
    fn encoder_agrees_at_group_boundaries() {
        for value in [0, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0x0FFF_FFFF] {
            assert_eq!(decode(&encode_vlq(value), true).unwrap(), value, "{value:#X}");
        }
    }

    #[test]
    fn round_trips_across_the_whole_range() {
        let boundaries = (1..=4).flat_map(|groups| {
            let top = (1u32 << (7 * groups)) - 1;
            [top - 1, top, top + 1]
        });
        for value in (0..=0x0FFF_FFFF).step_by(0x1235).chain(boundaries) {
            let value = value.min(0x0FFF_FFFF);
            let bytes = encode_vlq(value);
            assert!(bytes.len() <= 4, "{value:#X}");
            assert_eq!(decode(&bytes, true).unwrap(), value, "{value:#X}");
        }
    }

    #[test]
    fn strict_rejects_a_sixth_byte() {
        let err = decode(&[0x81, 0x80, 0x80, 0x80, 0x80, 0x00], true).unwrap_err();
        assert!(matches!(err.error_kind(), PlayerErrorKind::MalformedVlq));
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn lenient_reads_until_the_terminator() {
        assert!(decode(&[0x81, 0x80, 0x80, 0x80, 0x80, 0x00], false).is_ok());
    }

    #[test]
    fn track_end_terminates_a_dangling_quantity() {
        // the zero fill clears the continuation bit
        assert_eq!(decode(&[0x81], true).unwrap(), 0x80);
    }

    #[test]
    fn stays_inside_the_track() {
        let bytes = [0x81, 0x81, 0x00];
        let mut reader = Reader::new(SliceSource::new(&bytes));
        let mut track = reader.track(0, 2);
        assert_eq!(track.read_vlq(true).unwrap(), (1 << 14) | (1 << 7));
        assert_eq!(reader.buffer_position(), 2);
    }
}
