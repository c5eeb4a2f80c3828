#![doc = r#"
Chunk-level structure of a Standard MIDI File

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length and then the chunk data.

## [`FileHeader`]

The header chunk (identified by "MThd") must be the first chunk in a MIDI file. It always
declares a length of 6 bytes and carries the [`Format`], the number of tracks and the
division (ticks per quarter note).

## [`TrackHeader`]

Track chunks (identified by "MTrk") follow the header. Their declared length bounds every
read made while the track's events are decoded.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
```
"#]

mod header;
pub use header::*;

mod track;
pub use track::*;

mod tempo;
pub use tempo::*;
