use super::*;
use crate::reader::{ByteSource, EventError, PlayerErrorKind, ReadResult, TrackReader};

#[doc = r#"
Decodes one track event at a time, resolving running status.

```text
delta-time (VLQ)
  status == FF         -> meta: type, length (VLQ), length bytes
  status == F0 | F7    -> sysex: bytes up to and including F7, or track end
  status & 0x80 != 0   -> channel: new running status, 1 or 2 data bytes
  otherwise            -> channel: data byte under the running status
```

The decoder owns the running status, so feed it the tracks of one file in
order.
"#]
#[derive(Debug, Clone)]
pub struct EventDecoder {
    running: RunningStatus,
    payload_cap: usize,
    strict_vlq: bool,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD_CAP, true)
    }
}

impl EventDecoder {
    /// A decoder storing at most `payload_cap` bytes per event
    pub fn new(payload_cap: usize, strict_vlq: bool) -> Self {
        Self {
            running: RunningStatus::default(),
            payload_cap: payload_cap.max(MIN_PAYLOAD_CAP),
            strict_vlq,
        }
    }

    /// The running status in effect
    pub const fn running_status(&self) -> RunningStatus {
        self.running
    }

    /// Forget the running status, as at the start of a file.
    pub fn reset_running_status(&mut self) {
        self.running.clear();
    }

    /// Decode the next event of `track`.
    ///
    /// Fails with [`PlayerErrorKind::EndOfTrack`] if the track was already
    /// spent, and with [`EventError::Truncated`] if it runs out before the
    /// status or meta type byte. Data bytes past the end of the track read
    /// as zero.
    pub fn decode<S: ByteSource>(&mut self, track: &mut TrackReader<'_, S>) -> ReadResult<TrackEvent> {
        let first = track.read_required(PlayerErrorKind::EndOfTrack)?;
        let wait = track.read_vlq_from(first, self.strict_vlq)?;
        let status = track.read_required(EventError::Truncated)?;
        let mut payload = Payload::with_cap(self.payload_cap);

        let event = match status {
            META => {
                let meta_type = MetaType::from(track.read_required(EventError::Truncated)?);
                let len = track.read_vlq(self.strict_vlq)?;
                read_data(track, &mut payload, len)?;
                TrackEvent::new(wait, status, EventKind::Meta(meta_type), payload)
            }
            SYSEX | SYSEX_END => {
                while !track.is_exhausted() {
                    let byte = track.next_byte()?;
                    if track.is_truncated() {
                        break;
                    }
                    payload.push(byte);
                    if byte == SYSEX_END {
                        break;
                    }
                }
                TrackEvent::new(wait, status, EventKind::SysEx, payload)
            }
            status if is_status(status) => {
                self.running.update(status);
                read_data(track, &mut payload, data_len(status))?;
                TrackEvent::new(wait, status, EventKind::Channel { running: false }, payload)
            }
            data => {
                let Some(running) = self.running.get() else {
                    return Err(track.error(EventError::NoRunningStatus(data)));
                };
                payload.push(data);
                read_data(track, &mut payload, data_len(running) - 1)?;
                TrackEvent::new(wait, running, EventKind::Channel { running: true }, payload)
            }
        };

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(
                track = track.index(),
                wait = event.wait(),
                status = event.status(),
                data = ?event.data(),
                "decoded event"
            );
            if event.payload().is_truncated() {
                tracing::warn!(
                    track = track.index(),
                    declared = event.payload().declared_len(),
                    stored = event.data().len(),
                    "event payload truncated"
                );
            }
        }

        Ok(event)
    }
}

/// Read `count` bytes into `payload`.
///
/// Once the track is spent and the payload is full, the rest is only
/// counted, so a bogus length cannot spin on zero fill.
fn read_data<S: ByteSource>(
    track: &mut TrackReader<'_, S>,
    payload: &mut Payload,
    count: u32,
) -> ReadResult<()> {
    for read in 0..count {
        if track.is_exhausted() && payload.is_full() {
            payload.count_missing(count - read);
            break;
        }
        payload.push(track.next_byte()?);
    }
    Ok(())
}
