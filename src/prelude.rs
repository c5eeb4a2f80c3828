#![doc = r#"
Common imports for playing files
"#]

pub use crate::{
    UMicros,
    events::{EventDecoder, EventKind, MetaType, RunningStatus, TrackEvent},
    file::{FileHeader, Format, Tempo, TempoTracker, TrackHeader},
    player::{
        MidiSink, NeverStop, NoPacer, Pacer, PlaybackSummary, Player, PlayerConfig, StopSignal,
        all_sound_off, decode_and_play,
    },
    reader::{
        ByteSource, PlayerError, PlayerErrorKind, ReadResult, Reader, SinkError, SliceSource,
        SourceError,
    },
};

#[cfg(feature = "std")]
pub use crate::{
    player::{ThreadPacer, WriterSink},
    reader::ReadSource,
};

#[cfg(feature = "midir")]
pub use crate::player::MidirSink;
