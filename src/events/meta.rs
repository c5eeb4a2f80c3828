use num_enum::{FromPrimitive, IntoPrimitive};

#[doc = r#"
The type byte following `0xFF` in a meta event.

Only [`MetaType::Tempo`] changes playback. Every other type is decoded and
handed to [`MidiSink::on_meta`](crate::player::MidiSink::on_meta), never
transmitted.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaType {
    /// FF 00 02 ssss
    SequenceNumber = 0x00,
    /// FF 01 len text
    Text = 0x01,
    /// FF 02 len text
    Copyright = 0x02,
    /// FF 03 len text
    TrackName = 0x03,
    /// FF 04 len text
    InstrumentName = 0x04,
    /// FF 05 len text
    Lyric = 0x05,
    /// FF 06 len text
    Marker = 0x06,
    /// FF 07 len text
    CuePoint = 0x07,
    /// FF 20 01 cc
    ChannelPrefix = 0x20,
    /// FF 21 01 pp
    Port = 0x21,
    /// FF 2F 00
    EndOfTrack = 0x2F,
    /// FF 51 03 tttttt
    Tempo = 0x51,
    /// FF 54 05 hr mn se fr ff
    SmpteOffset = 0x54,
    /// FF 58 04 nn dd cc bb
    TimeSignature = 0x58,
    /// FF 59 02 sf mi
    KeySignature = 0x59,
    /// FF 7F len data
    SequencerSpecific = 0x7F,
    /// Any type not listed above
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// True for the types whose payload is text
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Copyright
                | Self::TrackName
                | Self::InstrumentName
                | Self::Lyric
                | Self::Marker
                | Self::CuePoint
        )
    }
}
