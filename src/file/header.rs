use crate::reader::{ByteSource, HeaderError, ReadResult, Reader, SourceError};
use num_enum::{FromPrimitive, IntoPrimitive};

#[doc = r#"
The arrangement of tracks declared by the header.

Players in this crate always walk the tracks in file order, so the format
is informational. Values outside 0-2 are kept rather than rejected.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Format {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
    /// Anything else
    #[num_enum(catch_all)]
    Unknown(u16),
}

#[doc = r#"
The contents of the `MThd` chunk.

The division is kept as the raw 16 bit field. Files with the SMPTE bit set
are still played as if the field were ticks per quarter note.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    format: Format,
    track_count: u16,
    division: u16,
}

impl FileHeader {
    /// Chunk type of the header
    pub const MAGIC: [u8; 4] = *b"MThd";
    /// The only header length accepted
    pub const LENGTH: u32 = 6;

    /// Create a header from its fields
    pub const fn new(format: Format, track_count: u16, division: u16) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Read and validate the header chunk.
    ///
    /// All fourteen bytes are consumed before anything is checked.
    pub fn read<S: ByteSource>(reader: &mut Reader<S>) -> ReadResult<Self> {
        let truncated = |reader: &Reader<S>, e: SourceError| match e {
            SourceError::Eof => reader.error(None, HeaderError::Truncated),
            e => reader.error(None, e),
        };
        let magic: [u8; 4] = reader.read_exact_size().map_err(|e| truncated(reader, e))?;
        let length = reader.read_u32().map_err(|e| truncated(reader, e))?;
        let format = reader.read_u16().map_err(|e| truncated(reader, e))?;
        let track_count = reader.read_u16().map_err(|e| truncated(reader, e))?;
        let division = reader.read_u16().map_err(|e| truncated(reader, e))?;

        if magic != Self::MAGIC {
            return Err(reader.error(None, HeaderError::Magic(magic)));
        }
        if length != Self::LENGTH {
            return Err(reader.error(None, HeaderError::Length(length)));
        }
        if division == 0 {
            return Err(reader.error(None, HeaderError::ZeroDivision));
        }

        let header = Self::new(Format::from_primitive(format), track_count, division);
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(format = ?header.format, track_count, division, "read file header");
            if header.is_smpte() {
                tracing::warn!(
                    division,
                    "SMPTE division is not supported, treating it as ticks per quarter note"
                );
            }
        }
        Ok(header)
    }

    /// The declared format
    pub const fn format(&self) -> Format {
        self.format
    }
    /// Number of `MTrk` chunks announced
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// Raw division field, used as ticks per quarter note
    pub const fn division(&self) -> u16 {
        self.division
    }
    /// True if the top bit of the division marks SMPTE timing
    pub const fn is_smpte(&self) -> bool {
        self.division & 0x8000 != 0
    }
}
