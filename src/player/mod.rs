#![doc = r#"
Real-time playback of a decoded stream

# Overview

A [`Player`] owns the output side of a session: a [`MidiSink`] that receives
raw MIDI bytes, a [`Pacer`] that decides how long to wait before each batch,
a [`StopSignal`] polled between events, and a [`PlayerConfig`].

[`Player::play`] reads the file header, then each track in file order,
decoding and emitting events as it goes. Whatever happens, it ends by
sending all sound off and all notes off on every channel, so connected
hardware is never left with hanging notes.

A track containing a malformed variable length quantity is abandoned at
that point: its remaining bytes are skipped, the error is kept in
[`PlaybackSummary::track_errors`] and the next track plays. A bad track
header, a source or sink failure, or a stop ends the session.

# Timing

Each event's delta time is converted with
`elapsed = wait * micros_per_quarter_note / division` and added to the
session clock. Before a channel or system exclusive event whose due time
differs from the last batch, the sink is flushed and the pacer waits until
that time. Meta events are never paced or transmitted.
"#]

mod clock;
pub use clock::*;

mod config;
pub use config::*;

mod framer;
pub use framer::*;

#[cfg(feature = "midir")]
mod midir_sink;
#[cfg(feature = "midir")]
pub use midir_sink::*;

mod pacer;
pub use pacer::*;

mod scheduler;
pub use scheduler::*;

mod sink;
pub use sink::*;

mod stop;
pub use stop::*;

use crate::{
    UMicros,
    file::{FileHeader, Tempo, TrackHeader},
    reader::{ByteSource, PlayerError, ReadResult, Reader},
};
use alloc::vec::Vec;

/// Channel mode controller silencing all sound immediately
pub const ALL_SOUND_OFF: u8 = 0x78;
/// Channel mode controller releasing all notes
pub const ALL_NOTES_OFF: u8 = 0x7B;

/// Send all sound off and all notes off on each of the 16 channels.
pub fn all_sound_off<K: MidiSink + ?Sized>(sink: &mut K) -> SinkResult<()> {
    for channel in 0..16u8 {
        for controller in [ALL_SOUND_OFF, ALL_NOTES_OFF] {
            sink.send(0xB0 | channel)?;
            sink.send(controller)?;
            sink.send(0x00)?;
        }
    }
    sink.flush()
}

/// What a completed playback went through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSummary {
    header: FileHeader,
    tracks_played: u16,
    track_errors: Vec<PlayerError>,
    stats: TrackStats,
    duration: UMicros,
    final_tempo: Tempo,
    bytes_read: usize,
}

impl PlaybackSummary {
    /// The file header
    pub const fn header(&self) -> &FileHeader {
        &self.header
    }
    /// Tracks played to their end, not counting abandoned ones
    pub const fn tracks_played(&self) -> u16 {
        self.tracks_played
    }
    /// Errors that abandoned a single track, in file order
    pub fn track_errors(&self) -> &[PlayerError] {
        &self.track_errors
    }
    /// Channel messages sent
    pub const fn channel_events(&self) -> usize {
        self.stats.channel_events
    }
    /// System exclusive messages sent
    pub const fn sysex_events(&self) -> usize {
        self.stats.sysex_events
    }
    /// Meta events seen
    pub const fn meta_events(&self) -> usize {
        self.stats.meta_events
    }
    /// Playback time of the last event
    pub const fn duration(&self) -> UMicros {
        self.duration
    }
    /// Tempo in effect at the end
    pub const fn final_tempo(&self) -> Tempo {
        self.final_tempo
    }
    /// Bytes consumed from the source
    pub const fn bytes_read(&self) -> usize {
        self.bytes_read
    }
}

#[doc = r#"
Plays Standard MIDI Files to a sink.

```rust
use smfplay::prelude::*;
use std::sync::{Arc, atomic::AtomicBool};

let stop = Arc::new(AtomicBool::new(false));
let mut player = Player::new(Vec::new(), NoPacer)
    .with_config(PlayerConfig::default().with_payload_cap(64))
    .with_stop_signal(stop.clone());

let err = player.play(SliceSource::new(b"RIFF")).unwrap_err();
assert!(matches!(err.error_kind(), PlayerErrorKind::BadFileHeader(_)));

// the all sound off sweep still ran
assert_eq!(player.sink().len(), 16 * 6);
```
"#]
pub struct Player<K, P, X = NeverStop> {
    sink: K,
    pacer: P,
    stop: X,
    config: PlayerConfig,
}

impl<K: MidiSink, P: Pacer> Player<K, P> {
    /// A player with the default configuration that never stops early
    pub fn new(sink: K, pacer: P) -> Self {
        Self {
            sink,
            pacer,
            stop: NeverStop,
            config: PlayerConfig::default(),
        }
    }
}

impl<K: MidiSink, P: Pacer, X: StopSignal> Player<K, P, X> {
    /// Replace the configuration
    pub fn with_config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Poll `stop` between events
    pub fn with_stop_signal<Y: StopSignal>(self, stop: Y) -> Player<K, P, Y> {
        Player {
            sink: self.sink,
            pacer: self.pacer,
            stop,
            config: self.config,
        }
    }

    /// The configuration
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }
    /// The sink
    pub const fn sink(&self) -> &K {
        &self.sink
    }
    /// The sink, mutably
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
    /// Returns the sink
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Decode `source` and play it, then silence every channel.
    ///
    /// The silencing sweep runs even when playback fails or is stopped;
    /// the playback error is the one returned. If playback succeeded but
    /// the sweep failed, the sweep's error is returned.
    pub fn play<S: ByteSource>(&mut self, source: S) -> ReadResult<PlaybackSummary> {
        let mut reader = Reader::new(source);
        self.pacer.start();
        let outcome = self.decode_and_play(&mut reader);

        if self.config.all_sound_off() {
            if let Err(e) = all_sound_off(&mut self.sink) {
                match outcome {
                    Ok(_) => return Err(reader.error(None, e)),
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::error!("all sound off failed after playback error: {e}");
                    }
                }
            }
        }
        outcome
    }

    fn decode_and_play<S: ByteSource>(&mut self, reader: &mut Reader<S>) -> ReadResult<PlaybackSummary> {
        let header = FileHeader::read(reader)?;
        let mut scheduler = Scheduler::new(&header, &self.config);
        let mut tracks_played = 0;
        let mut track_errors = Vec::new();

        for index in 0..header.track_count() {
            let track_header = TrackHeader::read(reader, index)?;
            let mut track = reader.track(index, track_header.length());
            match scheduler.play_track(&mut track, &mut self.sink, &mut self.pacer, &self.stop) {
                Ok(_) => tracks_played += 1,
                Err(e) if e.error_kind().is_track_fatal() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(track = index, skipped = track.remaining(), "{e}");
                    track.skip_rest()?;
                    track_errors.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        let summary = PlaybackSummary {
            header,
            tracks_played,
            track_errors,
            stats: scheduler.totals(),
            duration: scheduler.elapsed(),
            final_tempo: scheduler.tempo(),
            bytes_read: reader.buffer_position(),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?summary, "playback finished");
        Ok(summary)
    }
}

/// Play `source` to `sink` as fast as the sink accepts it.
///
/// Shorthand for a [`Player`] with [`NoPacer`] and the default configuration.
pub fn decode_and_play<S: ByteSource, K: MidiSink>(source: S, sink: K) -> Result<PlaybackSummary, PlayerError> {
    Player::new(sink, NoPacer).play(source)
}
