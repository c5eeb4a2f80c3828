use alloc::vec::Vec;

/// Stored payload cap used when none is configured
pub const DEFAULT_PAYLOAD_CAP: usize = 128;

/// Smallest cap accepted, so neither channel messages nor the three bytes
/// of a Set Tempo meta event are ever cut
pub const MIN_PAYLOAD_CAP: usize = 3;

#[doc = r#"
The data bytes of an event, stored up to a cap.

Every byte pushed counts toward the declared length, but only the first
`cap` are kept. Long meta and system exclusive payloads are therefore
consumed from the stream in full and truncated in memory.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
    declared: u32,
    cap: usize,
}

impl Payload {
    /// An empty payload keeping at most `cap` bytes
    pub fn with_cap(cap: usize) -> Self {
        Self {
            bytes: Vec::new(),
            declared: 0,
            cap,
        }
    }

    /// Count `byte` and keep it if there is room.
    pub fn push(&mut self, byte: u8) {
        self.declared = self.declared.saturating_add(1);
        if self.bytes.len() < self.cap {
            self.bytes.push(byte);
        }
    }

    /// Count `count` bytes that were never read, like dropped ones.
    pub fn count_missing(&mut self, count: u32) {
        self.declared = self.declared.saturating_add(count);
    }

    /// True once no more bytes will be stored
    pub fn is_full(&self) -> bool {
        self.bytes.len() >= self.cap
    }

    /// The stored bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Every byte pushed, stored or not
    pub const fn declared_len(&self) -> u32 {
        self.declared
    }

    /// True if some pushed bytes were dropped
    pub fn is_truncated(&self) -> bool {
        self.declared as usize > self.bytes.len()
    }

    /// The cap this payload was created with
    pub const fn cap(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_first_cap_bytes() {
        let mut payload = Payload::with_cap(3);
        for byte in 1..=5 {
            payload.push(byte);
        }
        assert_eq!(payload.as_slice(), &[1, 2, 3]);
        assert_eq!(payload.declared_len(), 5);
        assert!(payload.is_truncated());
    }

    #[test]
    fn short_payload_is_whole() {
        let mut payload = Payload::with_cap(DEFAULT_PAYLOAD_CAP);
        payload.push(0x40);
        assert!(!payload.is_truncated());
        assert_eq!(payload.cap(), DEFAULT_PAYLOAD_CAP);
    }
}
