#![doc = r#"
Track events as they come off the wire.

# Hierarchy
```text
                 |-------------|
                 | Track Event |
                 |-------------|
               /        |        \
|---------------| |------------| |-----------------|
| Channel event | | Meta event | | System exclusive|
|---------------| |------------| |-----------------|
```

Each [`TrackEvent`] holds the *effective* status: when an event was written
with running status, [`TrackEvent::status`] is the status it inherited.
"#]

mod decoder;
pub use decoder::*;

mod meta;
pub use meta::*;

mod payload;
pub use payload::*;

mod status;
pub use status::*;

/// What a decoded event is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A channel voice or mode message, transmitted as is
    Channel {
        /// True if the status byte was omitted in the file
        running: bool,
    },
    /// A meta event, never transmitted
    Meta(MetaType),
    /// A system exclusive message, transmitted as is
    SysEx,
}

#[doc = r#"
One decoded event: a delta time, an effective status, and its data.

Events are transient: the player decodes one, acts on it, and drops it
before decoding the next.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    wait: u32,
    status: u8,
    kind: EventKind,
    payload: Payload,
}

impl TrackEvent {
    /// Assemble an event from its parts
    pub const fn new(wait: u32, status: u8, kind: EventKind, payload: Payload) -> Self {
        Self {
            wait,
            status,
            kind,
            payload,
        }
    }

    /// Delta time in ticks since the previous event of the track
    pub const fn wait(&self) -> u32 {
        self.wait
    }
    /// The effective status byte
    pub const fn status(&self) -> u8 {
        self.status
    }
    /// The kind of event
    pub const fn kind(&self) -> EventKind {
        self.kind
    }
    /// The meta type, if this is a meta event
    pub const fn meta_type(&self) -> Option<MetaType> {
        match self.kind {
            EventKind::Meta(meta_type) => Some(meta_type),
            _ => None,
        }
    }
    /// True if this is a meta event
    pub const fn is_meta(&self) -> bool {
        matches!(self.kind, EventKind::Meta(_))
    }
    /// The stored data bytes, without the status
    pub fn data(&self) -> &[u8] {
        self.payload.as_slice()
    }
    /// The full payload record
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }
}
