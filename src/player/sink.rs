use crate::{events::MetaType, reader::SinkError};
use alloc::vec::Vec;

/// Result of a sink operation
pub type SinkResult<T> = Result<T, SinkError>;

#[doc = r#"
Where the player sends raw MIDI bytes.

The player writes each event as its effective status byte followed by its
stored data bytes. Before waiting on the clock it calls [`MidiSink::flush`],
so transports that ship bursts can send everything queued so far.

Meta events are never transmitted; they are offered to
[`MidiSink::on_meta`] instead, which ignores them by default.
"#]
pub trait MidiSink {
    /// Transmit one byte.
    fn send(&mut self, byte: u8) -> SinkResult<()>;

    /// Push out anything queued.
    fn flush(&mut self) -> SinkResult<()> {
        Ok(())
    }

    /// Observe a meta event. `data` may be truncated.
    fn on_meta(&mut self, meta_type: MetaType, data: &[u8]) -> SinkResult<()> {
        let _ = (meta_type, data);
        Ok(())
    }
}

impl<K: MidiSink + ?Sized> MidiSink for &mut K {
    fn send(&mut self, byte: u8) -> SinkResult<()> {
        (**self).send(byte)
    }
    fn flush(&mut self) -> SinkResult<()> {
        (**self).flush()
    }
    fn on_meta(&mut self, meta_type: MetaType, data: &[u8]) -> SinkResult<()> {
        (**self).on_meta(meta_type, data)
    }
}

/// Collects every transmitted byte.
impl MidiSink for Vec<u8> {
    fn send(&mut self, byte: u8) -> SinkResult<()> {
        self.push(byte);
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use writer::WriterSink;

#[cfg(feature = "std")]
mod writer {
    use super::*;
    use alloc::string::ToString;
    use std::io::{ErrorKind, Write};

    /// Writes bytes to any [`std::io::Write`], such as a raw MIDI device
    /// node or standard output.
    #[derive(Debug)]
    pub struct WriterSink<W> {
        inner: W,
    }

    impl<W: Write> WriterSink<W> {
        /// Wrap a writer
        pub const fn new(inner: W) -> Self {
            Self { inner }
        }
        /// Returns the wrapped writer
        pub fn into_inner(self) -> W {
            self.inner
        }
    }

    fn io_error(e: std::io::Error) -> SinkError {
        match e.kind() {
            ErrorKind::BrokenPipe | ErrorKind::NotConnected => SinkError::Disconnected,
            _ => SinkError::Transport(e.to_string()),
        }
    }

    impl<W: Write> MidiSink for WriterSink<W> {
        fn send(&mut self, byte: u8) -> SinkResult<()> {
            self.inner.write_all(&[byte]).map_err(io_error)
        }
        fn flush(&mut self) -> SinkResult<()> {
            self.inner.flush().map_err(io_error)
        }
    }

}
