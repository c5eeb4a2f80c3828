use super::{Clock, MidiSink, Pacer, PlayerConfig, StopSignal};
use crate::{
    UMicros,
    events::{EventDecoder, EventKind, TrackEvent},
    file::{FileHeader, Tempo, TempoTracker},
    reader::{ByteSource, PlayerErrorKind, ReadResult, TrackReader},
};

/// Per-event counts for one track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackStats {
    /// Channel messages sent
    pub channel_events: usize,
    /// System exclusive messages sent
    pub sysex_events: usize,
    /// Meta events seen
    pub meta_events: usize,
}

impl core::ops::AddAssign for TrackStats {
    fn add_assign(&mut self, rhs: Self) {
        self.channel_events += rhs.channel_events;
        self.sysex_events += rhs.sysex_events;
        self.meta_events += rhs.meta_events;
    }
}

#[doc = r#"
The decode and playback state of one file.

Holds the running status, tempo and clock for the whole session. Tracks are
fed one after another through [`Scheduler::play_track`]; none of the state
is reset between them unless configured.
"#]
#[derive(Debug, Clone)]
pub struct Scheduler {
    decoder: EventDecoder,
    tempo: TempoTracker,
    clock: Clock,
    totals: TrackStats,
    reset_running_status: bool,
}

impl Scheduler {
    /// Fresh state for the file described by `header`
    pub fn new(header: &FileHeader, config: &PlayerConfig) -> Self {
        Self {
            decoder: EventDecoder::new(config.payload_cap(), config.strict_vlq()),
            tempo: TempoTracker::new(header.division()),
            clock: Clock::new(),
            totals: TrackStats::default(),
            reset_running_status: config.reset_running_status_per_track(),
        }
    }

    /// The tempo in effect
    pub const fn tempo(&self) -> Tempo {
        self.tempo.tempo()
    }

    /// When the current event is due
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The event decoder
    pub const fn decoder(&self) -> &EventDecoder {
        &self.decoder
    }

    /// Counts over every track fed so far, including any that failed
    pub const fn totals(&self) -> TrackStats {
        self.totals
    }

    /// Decode and play `track` until its declared length is spent.
    ///
    /// A track that ends in the middle of an event is played up to that
    /// event. Any other error aborts the track and is returned; events
    /// already sent are still counted in [`Scheduler::totals`].
    pub fn play_track<S, K, P, X>(
        &mut self,
        track: &mut TrackReader<'_, S>,
        sink: &mut K,
        pacer: &mut P,
        stop: &X,
    ) -> ReadResult<TrackStats>
    where
        S: ByteSource,
        K: MidiSink + ?Sized,
        P: Pacer + ?Sized,
        X: StopSignal + ?Sized,
    {
        if self.reset_running_status {
            self.decoder.reset_running_status();
        }
        let mut stats = TrackStats::default();
        let outcome = self.play_events(track, sink, pacer, stop, &mut stats);
        self.totals += stats;
        outcome.map(|()| stats)
    }

    fn play_events<S, K, P, X>(
        &mut self,
        track: &mut TrackReader<'_, S>,
        sink: &mut K,
        pacer: &mut P,
        stop: &X,
        stats: &mut TrackStats,
    ) -> ReadResult<()>
    where
        S: ByteSource,
        K: MidiSink + ?Sized,
        P: Pacer + ?Sized,
        X: StopSignal + ?Sized,
    {
        while !track.is_exhausted() {
            if stop.should_stop() {
                return Err(track.error(PlayerErrorKind::Stopped));
            }

            let event = match self.decoder.decode(track) {
                Ok(event) => event,
                Err(e) if e.is_track_end() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(track = track.index(), "{e}");
                    break;
                }
                Err(e) => return Err(e),
            };

            // a tempo event's own delta is already measured in the new tempo
            if let Some(_tempo) = self.tempo.observe(&event) {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    track = track.index(),
                    micros_per_quarter_note = _tempo.micros_per_quarter_note(),
                    bpm = _tempo.bpm(),
                    "tempo change"
                );
            }
            self.clock.advance(self.tempo.ticks_to_micros(event.wait()));

            self.dispatch(&event, sink, pacer, stats)
                .map_err(|kind| track.error(kind))?;
        }
        Ok(())
    }

    fn dispatch<K, P>(
        &mut self,
        event: &TrackEvent,
        sink: &mut K,
        pacer: &mut P,
        stats: &mut TrackStats,
    ) -> Result<(), PlayerErrorKind>
    where
        K: MidiSink + ?Sized,
        P: Pacer + ?Sized,
    {
        match event.kind() {
            EventKind::Meta(meta_type) => {
                stats.meta_events += 1;
                sink.on_meta(meta_type, event.data())?;
            }
            kind => {
                if self.clock.needs_pacing() {
                    sink.flush()?;
                    pacer.wait_until(self.clock.next());
                    self.clock.mark_emitted();
                }
                sink.send(event.status())?;
                for byte in event.data() {
                    sink.send(*byte)?;
                }
                match kind {
                    EventKind::SysEx => stats.sysex_events += 1,
                    _ => stats.channel_events += 1,
                }
            }
        }
        Ok(())
    }

    /// Playback time reached so far
    pub const fn elapsed(&self) -> UMicros {
        self.clock.next()
    }
}
