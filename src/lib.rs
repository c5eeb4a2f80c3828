#![doc = r#"
A streaming decoder and real-time player for Standard MIDI Files.

`smfplay` reads an SMF byte stream one byte at a time, decodes each track's
events as they arrive (variable-length quantities, running status, meta and
system exclusive events) and replays them to a [`MidiSink`](crate::player::MidiSink)
at the wall-clock offsets implied by the file's division and tempo map.

Nothing is buffered ahead of the event being played, so the player runs in
constant memory regardless of file length.

# Example

```rust
use smfplay::prelude::*;

let file: &[u8] = &[
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 7,
    0x00, 0x90, 0x40, 0x40,
    0x60, 0x40, 0x00,
];

let mut player = Player::new(Vec::new(), NoPacer);
let summary = player.play(SliceSource::new(file)).unwrap();
assert_eq!(summary.channel_events(), 2);
```

# Architecture

```text
ByteSource -> Reader/TrackReader -> EventDecoder -> TempoTracker -> Scheduler -> MidiSink
```

Tracks are played one after another in file order; they are never merged.
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod events;
pub mod file;
pub mod micros;
pub mod player;
pub mod reader;

pub mod prelude;

pub use micros::UMicros;
pub use reader::{PlayerError, PlayerErrorKind, ReadResult};
