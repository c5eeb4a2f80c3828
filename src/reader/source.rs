use super::SourceError;

#[doc = r#"
Anything that can hand out the bytes of a MIDI file in order.

This is the only capability the decoder needs from storage, so a file
handle, a memory-mapped region or an SD-card block reader can all be
plugged in. Report the end of the data with [`SourceError::Eof`].
"#]
pub trait ByteSource {
    /// Read the next sequential byte.
    fn next_byte(&mut self) -> Result<u8, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<u8, SourceError> {
        (**self).next_byte()
    }
}

/// A [`ByteSource`] over a borrowed slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Read from the start of `bytes`
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }
    /// Bytes not yet handed out
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<u8, SourceError> {
        let byte = *self.bytes.get(self.position).ok_or(SourceError::Eof)?;
        self.position += 1;
        Ok(byte)
    }
}

#[cfg(feature = "std")]
pub use io::ReadSource;

#[cfg(feature = "std")]
mod io {
    use super::*;
    use alloc::string::ToString;
    use std::io::{ErrorKind, Read};

    /// A [`ByteSource`] over any [`std::io::Read`].
    ///
    /// Reads one byte per call, so wrap unbuffered handles in a
    /// [`BufReader`](std::io::BufReader) first.
    #[derive(Debug)]
    pub struct ReadSource<R> {
        inner: R,
    }

    impl<R: Read> ReadSource<R> {
        /// Wrap a reader
        pub const fn new(inner: R) -> Self {
            Self { inner }
        }
        /// Returns the wrapped reader
        pub fn into_inner(self) -> R {
            self.inner
        }
    }

    impl<R: Read> ByteSource for ReadSource<R> {
        fn next_byte(&mut self) -> Result<u8, SourceError> {
            let mut buf = [0u8; 1];
            loop {
                match self.inner.read(&mut buf) {
                    Ok(0) => return Err(SourceError::Eof),
                    Ok(_) => return Ok(buf[0]),
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(SourceError::Io(e.to_string())),
                }
            }
        }
    }

}
