/// Status byte introducing a meta event
pub const META: u8 = 0xFF;
/// Status byte opening a system exclusive message
pub const SYSEX: u8 = 0xF0;
/// Status byte of an escaped or continued system exclusive packet, and the
/// terminator of every system exclusive message
pub const SYSEX_END: u8 = 0xF7;

/// True if the high bit marks `byte` as a status byte.
pub const fn is_status(byte: u8) -> bool {
    byte & 0x80 != 0
}

/// Number of data bytes following a channel status.
///
/// Program Change (`0xCn`) and Channel Pressure (`0xDn`) take one; every
/// other status read through this path takes two.
pub const fn data_len(status: u8) -> u32 {
    if status & 0xE0 == 0xC0 { 1 } else { 2 }
}

#[doc = r#"
The last channel status seen in the stream.

A data byte in status position reuses it. Meta and system exclusive events
never replace it. It is kept across tracks unless the player is configured
to clear it.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunningStatus(Option<u8>);

impl RunningStatus {
    /// The stored status, if any channel status was seen yet
    pub const fn get(&self) -> Option<u8> {
        self.0
    }

    /// Remember `status`.
    pub fn update(&mut self, status: u8) {
        debug_assert!(is_status(status));
        self.0 = Some(status);
    }

    /// Forget the stored status.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_lengths() {
        assert_eq!(data_len(0x90), 2);
        assert_eq!(data_len(0xB3), 2);
        assert_eq!(data_len(0xC0), 1);
        assert_eq!(data_len(0xDF), 1);
        assert_eq!(data_len(0xE1), 2);
    }

    #[test]
    fn running_status_lifecycle() {
        let mut running = RunningStatus::default();
        assert_eq!(running.get(), None);
        running.update(0x92);
        assert_eq!(running.get(), Some(0x92));
        running.clear();
        assert_eq!(running.get(), None);
    }
}
