#![doc = r#"
Byte-level access to an SMF stream.

A [`ByteSource`] hands out one byte at a time. [`Reader`] wraps it and keeps
the absolute stream offset used in error reports, along with the big-endian
helpers chunk headers need. While a track is playing, every read goes
through a [`TrackReader`], which enforces the track's declared length.
"#]

mod error;
pub use error::*;

mod source;
pub use source::*;

mod vlq;
pub use vlq::*;

#[doc = r#"
A stream reader that counts every byte it hands out.
"#]
pub struct Reader<S> {
    source: S,
    position: usize,
}

impl<S: ByteSource> Reader<S> {
    /// Wrap a byte source
    pub const fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Read the next byte of the stream.
    pub fn read_u8(&mut self) -> Result<u8, SourceError> {
        let byte = self.source.next_byte()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read `N` sequential bytes.
    pub fn read_exact_size<const N: usize>(&mut self) -> Result<[u8; N], SourceError> {
        let mut bytes = [0; N];
        for byte in bytes.iter_mut() {
            *byte = self.read_u8()?;
        }
        Ok(bytes)
    }

    /// Big-endian 16 bit read
    pub fn read_u16(&mut self) -> Result<u16, SourceError> {
        Ok(u16::from_be_bytes(self.read_exact_size()?))
    }

    /// Big-endian 32 bit read
    pub fn read_u32(&mut self) -> Result<u32, SourceError> {
        Ok(u32::from_be_bytes(self.read_exact_size()?))
    }

    /// Bound the following reads to a track of `length` bytes.
    pub fn track(&mut self, index: u16, length: u32) -> TrackReader<'_, S> {
        TrackReader {
            reader: self,
            index,
            length,
            consumed: 0,
            truncated: false,
        }
    }

    /// Build an error at the current position
    pub(crate) fn error(&self, track: Option<u16>, kind: impl Into<PlayerErrorKind>) -> PlayerError {
        PlayerError::new(self.position, track, kind.into())
    }

    /// Returns the wrapped source
    pub fn into_inner(self) -> S {
        self.source
    }
}

#[doc = r#"
Reads inside one `MTrk` chunk.

The reader never hands out a byte past the track's declared length. Once
the budget is spent, [`TrackReader::next_byte`] returns `0` instead of
touching the stream, so the next chunk is never consumed by a malformed
event. The same zero fill applies if the stream itself ends early.
"#]
pub struct TrackReader<'r, S> {
    reader: &'r mut Reader<S>,
    index: u16,
    length: u32,
    consumed: u32,
    truncated: bool,
}

impl<S: ByteSource> TrackReader<'_, S> {
    /// Index of this track in the file
    pub const fn index(&self) -> u16 {
        self.index
    }
    /// Declared length of the track in bytes
    pub const fn length(&self) -> u32 {
        self.length
    }
    /// Bytes attributed to the track so far
    pub const fn consumed(&self) -> u32 {
        self.consumed
    }
    /// Bytes left in the track's budget
    pub const fn remaining(&self) -> u32 {
        self.length.saturating_sub(self.consumed)
    }
    /// True once the declared length has been read
    pub const fn is_exhausted(&self) -> bool {
        self.consumed >= self.length
    }
    /// True if the stream ended before the declared length was reached
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
    /// Absolute stream offset of the next byte
    pub const fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Read the next byte of the track, or `0` once the track is exhausted.
    ///
    /// Only a failing source produces an error.
    pub fn next_byte(&mut self) -> ReadResult<u8> {
        if self.is_exhausted() {
            return Ok(0);
        }
        match self.reader.read_u8() {
            Ok(byte) => {
                self.consumed += 1;
                Ok(byte)
            }
            Err(SourceError::Eof) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    track = self.index,
                    missing = self.remaining(),
                    "stream ended inside a track"
                );
                self.truncated = true;
                self.consumed = self.length;
                Ok(0)
            }
            Err(e) => Err(self.error(e)),
        }
    }

    /// Read a byte the current event cannot do without.
    ///
    /// Fails with `missing` when the budget is already spent or the stream
    /// ends here.
    pub fn read_required(&mut self, missing: impl Into<PlayerErrorKind>) -> ReadResult<u8> {
        if self.is_exhausted() {
            return Err(self.error(missing));
        }
        let byte = self.next_byte()?;
        if self.truncated {
            return Err(self.error(missing));
        }
        Ok(byte)
    }

    /// Consume whatever is left of the track without decoding it.
    pub fn skip_rest(&mut self) -> ReadResult<()> {
        while !self.is_exhausted() {
            self.next_byte()?;
        }
        Ok(())
    }

    /// Build an error at the current position, tagged with this track.
    pub fn error(&self, kind: impl Into<PlayerErrorKind>) -> PlayerError {
        self.reader.error(Some(self.index), kind)
    }
}
