use alloc::string::String;
use core::fmt;
use thiserror::Error;

#[doc = r#"
An error raised while decoding or playing a MIDI file.

Carries the absolute byte offset into the stream at which the problem was
noticed, and the zero-based index of the track being played, if any.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at position {position}{}, {kind}", track_suffix(.track))]
pub struct PlayerError {
    position: usize,
    track: Option<u16>,
    pub(crate) kind: PlayerErrorKind,
}

/// A kind of error that playback can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerErrorKind {
    /// The `MThd` chunk is missing or malformed. Nothing was played.
    #[error("Bad file header: {0}")]
    BadFileHeader(#[from] HeaderError),
    /// An `MTrk` chunk header is malformed. Remaining tracks are skipped.
    #[error("Bad track header: {0}")]
    BadTrackHeader(#[from] TrackHeaderError),
    /// A variable-length quantity ran past five bytes. The rest of the
    /// track is skipped.
    #[error("Malformed variable length quantity")]
    MalformedVlq,
    /// The track's byte budget was spent before an event could start.
    #[error("End of track")]
    EndOfTrack,
    /// An event could not be decoded.
    #[error("Bad event: {0}")]
    BadEvent(#[from] EventError),
    /// The byte source failed.
    #[error("Source: {0}")]
    Source(#[from] SourceError),
    /// The MIDI sink rejected a byte.
    #[error("Sink: {0}")]
    Sink(#[from] SinkError),
    /// Playback was cancelled through a stop signal.
    #[error("Playback stopped")]
    Stopped,
}

impl PlayerErrorKind {
    /// True when this kind only ends the current track's event loop.
    ///
    /// These mirror a silent over-read of a track: the remaining tracks
    /// still play.
    pub const fn is_track_end(&self) -> bool {
        matches!(
            self,
            Self::EndOfTrack | Self::BadEvent(EventError::Truncated)
        )
    }

    /// True when this kind abandons the current track, whose remaining
    /// bytes are skipped so the next track can still play.
    pub const fn is_track_fatal(&self) -> bool {
        matches!(self, Self::MalformedVlq)
    }

    /// True when this kind ends the whole session.
    pub const fn is_fatal(&self) -> bool {
        !self.is_track_end() && !self.is_track_fatal()
    }
}

/// Problems with the `MThd` chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Expected `MThd`
    #[error("Expected chunk type MThd, found {0:02X?}")]
    Magic([u8; 4]),
    /// The header chunk always declares six bytes
    #[error("Header length must be 6, found {0}")]
    Length(u32),
    /// A division of zero would make every tick infinitely long
    #[error("Division of zero ticks per quarter note")]
    ZeroDivision,
    /// The stream ended inside the header
    #[error("Stream ended inside the header chunk")]
    Truncated,
}

/// Problems with an `MTrk` chunk header
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackHeaderError {
    /// Expected `MTrk`
    #[error("Expected chunk type MTrk, found {0:02X?}")]
    Magic([u8; 4]),
    /// The stream ended inside the track header
    #[error("Stream ended inside a track header")]
    Truncated,
}

/// Problems decoding a single event
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// The track ended partway through the event
    #[error("Track ended inside an event")]
    Truncated,
    /// A data byte appeared before any channel status byte
    #[error("Data byte {0:#04X} with no running status")]
    NoRunningStatus(u8),
}

/// Failures reported by a [`ByteSource`](crate::reader::ByteSource)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No more bytes
    #[error("Unexpected end of stream")]
    Eof,
    /// The underlying medium failed
    #[error("I/O failure: {0}")]
    Io(String),
}

/// Failures reported by a [`MidiSink`](crate::player::MidiSink)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The output went away
    #[error("MIDI output disconnected")]
    Disconnected,
    /// The output refused the data
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl PlayerError {
    /// Create a player error from a position and kind
    pub const fn new(position: usize, track: Option<u16>, kind: PlayerErrorKind) -> Self {
        Self {
            position,
            track,
            kind,
        }
    }
    /// True if this error only ended a track
    pub const fn is_track_end(&self) -> bool {
        self.kind.is_track_end()
    }
    /// True if playback was cancelled
    pub const fn is_stopped(&self) -> bool {
        matches!(self.kind, PlayerErrorKind::Stopped)
    }
    /// Returns the error kind.
    pub fn error_kind(&self) -> &PlayerErrorKind {
        &self.kind
    }
    /// Consumes the error, returning its kind.
    pub fn into_kind(self) -> PlayerErrorKind {
        self.kind
    }
    /// Returns the absolute stream offset where the error occurred.
    pub fn position(&self) -> usize {
        self.position
    }
    /// Returns the index of the track being read, if any.
    pub fn track(&self) -> Option<u16> {
        self.track
    }
}

/// The Read Result type (see [`PlayerError`])
pub type ReadResult<T> = Result<T, PlayerError>;

struct TrackSuffix(Option<u16>);

fn track_suffix(track: &Option<u16>) -> TrackSuffix {
    TrackSuffix(*track)
}

impl fmt::Display for TrackSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(track) => write!(f, " in track {track}"),
            None => Ok(()),
        }
    }
}
