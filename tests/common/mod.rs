#![allow(dead_code)]

use smfplay::player::SinkResult;
use smfplay::prelude::*;
use std::{cell::RefCell, rc::Rc};

/// Everything a player did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Byte(u8),
    Flush,
    Wait(u64),
    Meta(MetaType, Vec<u8>),
}

/// Shared between a sink and a pacer so their calls interleave in one list.
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Action>>>);

/// 16 channels * 2 controllers * 3 bytes, then a flush
pub const SWEEP_LEN: usize = 97;

impl Log {
    pub fn sink(&self) -> LogSink {
        LogSink(self.clone())
    }
    pub fn pacer(&self) -> LogPacer {
        LogPacer(self.clone())
    }
    pub fn actions(&self) -> Vec<Action> {
        self.0.borrow().clone()
    }
    /// Actions before the all sound off sweep.
    pub fn playback(&self) -> Vec<Action> {
        let actions = self.actions();
        assert!(actions.len() >= SWEEP_LEN, "no all sound off sweep: {actions:?}");
        assert!(self.ends_with_sweep());
        actions[..actions.len() - SWEEP_LEN].to_vec()
    }
    pub fn ends_with_sweep(&self) -> bool {
        let mut expected = Vec::new();
        for channel in 0..16u8 {
            expected.extend(bytes(&[0xB0 | channel, 0x78, 0x00, 0xB0 | channel, 0x7B, 0x00]));
        }
        expected.push(Action::Flush);
        self.actions().ends_with(&expected)
    }
    pub fn waits(&self) -> Vec<u64> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Wait(at) => Some(at),
                _ => None,
            })
            .collect()
    }
    fn push(&self, action: Action) {
        self.0.borrow_mut().push(action);
    }
}

pub struct LogSink(Log);

impl MidiSink for LogSink {
    fn send(&mut self, byte: u8) -> SinkResult<()> {
        self.0.push(Action::Byte(byte));
        Ok(())
    }
    fn flush(&mut self) -> SinkResult<()> {
        self.0.push(Action::Flush);
        Ok(())
    }
    fn on_meta(&mut self, meta_type: MetaType, data: &[u8]) -> SinkResult<()> {
        self.0.push(Action::Meta(meta_type, data.to_vec()));
        Ok(())
    }
}

pub struct LogPacer(Log);

impl Pacer for LogPacer {
    fn wait_until(&mut self, at: UMicros) {
        self.0.push(Action::Wait(at.us()));
    }
}

pub fn bytes(raw: &[u8]) -> Vec<Action> {
    raw.iter().map(|b| Action::Byte(*b)).collect()
}

pub fn header(format: u16, ntracks: u16, division: u16) -> Vec<u8> {
    let mut out = b"MThd".to_vec();
    out.extend(6u32.to_be_bytes());
    out.extend(format.to_be_bytes());
    out.extend(ntracks.to_be_bytes());
    out.extend(division.to_be_bytes());
    out
}

pub fn track(events: &[u8]) -> Vec<u8> {
    let mut out = b"MTrk".to_vec();
    out.extend((events.len() as u32).to_be_bytes());
    out.extend_from_slice(events);
    out
}

/// A format 0 or 1 file at `division` holding `tracks` in order.
pub fn smf(division: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let format = if tracks.len() == 1 { 0 } else { 1 };
    let mut out = header(format, tracks.len() as u16, division);
    for events in tracks {
        out.extend(track(events));
    }
    out
}

pub fn vlq(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out.reverse();
    out
}

pub fn play(file: &[u8], config: PlayerConfig) -> (Log, ReadResult<PlaybackSummary>) {
    let log = Log::default();
    let mut player = Player::new(log.sink(), log.pacer()).with_config(config);
    let result = player.play(SliceSource::new(file));
    (log, result)
}
