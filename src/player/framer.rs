use crate::events::{SYSEX, SYSEX_END, is_status};
use alloc::vec::Vec;

/// Groups a raw byte stream back into whole MIDI messages.
///
/// Port APIs want one complete message per call, while the player emits
/// bytes one at a time.
#[derive(Debug)]
pub struct MessageFramer {
    buffer: Vec<u8>,
    length: MessageLength,
    done: bool,
}

impl Default for MessageFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFramer {
    /// An idle framer
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(3),
            length: MessageLength::SysEx,
            done: true,
        }
    }

    /// Feed one byte; returns the message it completes, if any.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        let closes_sysex =
            !self.done && self.length == MessageLength::SysEx && byte == SYSEX_END;

        if is_status(byte) && !closes_sysex {
            if !self.done {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    dropped = self.buffer.len(),
                    "incomplete midi message 0x{:02x} replaced by status 0x{:02x}",
                    self.buffer.first().copied().unwrap_or_default(),
                    byte
                );
            }
            self.buffer.clear();
            self.length = MessageLength::new(byte);
            self.done = false;
        } else if self.done {
            #[cfg(feature = "tracing")]
            tracing::warn!("data byte 0x{:02x} outside of a message", byte);
            return None;
        }

        self.buffer.push(byte);

        if self.length.was_last_byte(self.buffer.len(), byte) {
            self.done = true;
            Some(&self.buffer)
        } else {
            None
        }
    }

    /// Status byte of the message being assembled, if one is incomplete
    pub fn pending_status(&self) -> Option<u8> {
        self.buffer.first().copied().filter(|_| !self.done)
    }

    /// Drop a partially assembled message, returning how many bytes it held.
    pub fn reset(&mut self) -> usize {
        let pending = if self.done { 0 } else { self.buffer.len() };
        self.buffer.clear();
        self.done = true;
        pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageLength {
    Fixed(usize),
    SysEx,
}

impl MessageLength {
    fn new(first_byte: u8) -> Self {
        match (first_byte, first_byte & 0xF0) {
            (SYSEX | SYSEX_END, _) => MessageLength::SysEx,
            (0xF2, _) | (_, 0x80 | 0x90 | 0xA0 | 0xB0 | 0xE0) => MessageLength::Fixed(3),
            (0xF1 | 0xF3, _) | (_, 0xC0 | 0xD0) => MessageLength::Fixed(2),
            _ => MessageLength::Fixed(1),
        }
    }

    fn was_last_byte(&self, len: usize, byte: u8) -> bool {
        match self {
            MessageLength::Fixed(n) => len >= *n,
            MessageLength::SysEx => len > 1 && byte == SYSEX_END,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn frame(bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut framer = MessageFramer::new();
        bytes
            .iter()
            .filter_map(|b| framer.push(*b).map(|m| m.to_vec()))
            .collect()
    }

    #[test]
    fn splits_channel_messages() {
        assert_eq!(
            frame(&[0x90, 0x40, 0x7F, 0xC1, 0x05, 0x80, 0x40, 0x00]),
            vec![vec![0x90, 0x40, 0x7F], vec![0xC1, 0x05], vec![0x80, 0x40, 0x00]]
        );
    }

    #[test]
    fn sysex_runs_to_terminator() {
        assert_eq!(
            frame(&[0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7, 0xB0, 0x78, 0x00]),
            vec![vec![0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7], vec![0xB0, 0x78, 0x00]]
        );
    }

    #[test]
    fn escaped_sysex_packet() {
        assert_eq!(frame(&[0xF7, 0x43, 0xF7]), vec![vec![0xF7, 0x43, 0xF7]]);
    }

    #[test]
    fn truncated_message_is_replaced() {
        assert_eq!(
            frame(&[0xF0, 0x01, 0x02, 0x90, 0x3C, 0x40]),
            vec![vec![0x90, 0x3C, 0x40]]
        );
    }

    #[test]
    fn stray_data_is_ignored() {
        assert_eq!(frame(&[0x40, 0xC0, 0x01, 0x02]), vec![vec![0xC0, 0x01]]);
    }

    #[test]
    fn reset_reports_pending_bytes() {
        let mut framer = MessageFramer::new();
        framer.push(0xF0);
        framer.push(0x01);
        assert_eq!(framer.pending_status(), Some(0xF0));
        assert_eq!(framer.reset(), 2);
        assert_eq!(framer.pending_status(), None);
        assert_eq!(framer.reset(), 0);
    }

    #[test]
    fn sysex_cut_at_the_cap_stays_pending() {
        let mut framer = MessageFramer::new();
        for byte in [0xF0, 0x43, 0x10, 0x4C] {
            assert_eq!(framer.push(byte), None);
        }
        assert_eq!(framer.pending_status(), Some(0xF0));
        assert_eq!(framer.push(0x90), None);
        assert_eq!(framer.pending_status(), Some(0x90));
    }
}
