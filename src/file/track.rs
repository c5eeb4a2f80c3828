use crate::reader::{ByteSource, ReadResult, Reader, SourceError, TrackHeaderError};

/// The header of an `MTrk` chunk.
///
/// Any length is accepted; it only bounds the reads that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackHeader {
    index: u16,
    length: u32,
}

impl TrackHeader {
    /// Chunk type of a track
    pub const MAGIC: [u8; 4] = *b"MTrk";

    /// Read the chunk type and length of the track at `index`.
    pub fn read<S: ByteSource>(reader: &mut Reader<S>, index: u16) -> ReadResult<Self> {
        let truncated = |reader: &Reader<S>, e: SourceError| match e {
            SourceError::Eof => reader.error(Some(index), TrackHeaderError::Truncated),
            e => reader.error(Some(index), e),
        };
        let magic: [u8; 4] = reader.read_exact_size().map_err(|e| truncated(reader, e))?;
        let length = reader.read_u32().map_err(|e| truncated(reader, e))?;

        if magic != Self::MAGIC {
            return Err(reader.error(Some(index), TrackHeaderError::Magic(magic)));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(track = index, length, "read track header");
        Ok(Self { index, length })
    }

    /// Position of the track in the file
    pub const fn index(&self) -> u16 {
        self.index
    }
    /// Declared number of event bytes
    pub const fn length(&self) -> u32 {
        self.length
    }
}
