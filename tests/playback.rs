mod common;

use common::*;
use pretty_assertions::assert_eq;
use smfplay::prelude::*;

const END: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

#[test]
fn note_on_then_paced_note_off() {
    let file = smf(
        96,
        &[&[
            0x00, 0x90, 0x40, 0x40, // note on
            0x60, 0x40, 0x00, // running status, velocity 0
        ]],
    );
    let (log, result) = play(&file, PlayerConfig::default());
    let summary = result.unwrap();

    let mut expected = bytes(&[0x90, 0x40, 0x40]);
    expected.push(Action::Flush);
    expected.push(Action::Wait(500_000));
    expected.extend(bytes(&[0x90, 0x40, 0x00]));
    assert_eq!(log.playback(), expected);

    assert_eq!(summary.channel_events(), 2);
    assert_eq!(summary.duration(), UMicros::from_ms(500));
    assert_eq!(summary.bytes_read(), file.len());
}

#[test]
fn explicit_note_off_status() {
    let file = smf(96, &[&[0x00, 0x90, 0x40, 0x40, 0x60, 0x80, 0x40, 0x40, 0x00, 0x3C, 0x40]]);
    let (log, result) = play(&file, PlayerConfig::default());
    result.unwrap();

    let mut expected = bytes(&[0x90, 0x40, 0x40]);
    expected.extend([Action::Flush, Action::Wait(500_000)]);
    expected.extend(bytes(&[0x80, 0x40, 0x40, 0x80, 0x3C, 0x40]));
    assert_eq!(log.playback(), expected);
}

#[test]
fn simultaneous_events_share_one_wait() {
    let file = smf(
        480,
        &[&[
            0x83, 0x60, 0x90, 0x3C, 0x40, // 480 ticks
            0x00, 0x40, 0x40, // chord
            0x00, 0x43, 0x40,
        ]],
    );
    let (log, result) = play(&file, PlayerConfig::default());
    result.unwrap();
    assert_eq!(log.waits(), vec![500_000]);
}

#[test]
fn tempo_changes_the_tick_length() {
    let mut events = vec![0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40]; // 1s per quarter
    events.extend([0x60, 0x90, 0x3C, 0x40]);
    events.extend([0x30, 0x3C, 0x00]);
    events.extend(END);
    let file = smf(96, &[&events]);

    let (log, result) = play(&file, PlayerConfig::default());
    let summary = result.unwrap();
    assert_eq!(log.waits(), vec![1_000_000, 1_500_000]);
    assert_eq!(summary.final_tempo(), Tempo::new(1_000_000));
    assert_eq!(summary.meta_events(), 2);
}

#[test]
fn tempo_events_own_delta_uses_the_new_tempo() {
    let mut events = vec![0x60, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40];
    events.extend([0x00, 0x90, 0x3C, 0x40]);
    let file = smf(96, &[&events]);

    let (log, result) = play(&file, PlayerConfig::default());
    result.unwrap();
    assert_eq!(log.waits(), vec![1_000_000]);
}

#[test]
fn default_tempo_bytes_keep_120_bpm() {
    let mut events = vec![0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
    events.extend([0x60, 0x90, 0x3C, 0x40]);
    let file = smf(96, &[&events]);

    let (log, result) = play(&file, PlayerConfig::default());
    assert_eq!(result.unwrap().final_tempo(), Tempo::DEFAULT);
    assert_eq!(log.waits(), vec![500_000]);
}

#[test]
fn tracks_play_in_sequence_and_share_tempo() {
    let mut conductor = vec![0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40];
    conductor.extend([0x60, 0xFF, 0x2F, 0x00]);
    let first = [0x00, 0x90, 0x3C, 0x40, 0x60, 0x80, 0x3C, 0x00];
    let second = [0x30, 0x91, 0x43, 0x40];
    let file = smf(96, &[&conductor, &first, &second]);

    let (log, result) = play(&file, PlayerConfig::default());
    let summary = result.unwrap();

    // the clock carries on from one track to the next
    assert_eq!(log.waits(), vec![1_000_000, 2_000_000, 2_500_000]);
    assert_eq!(summary.tracks_played(), 3);
    assert_eq!(summary.header().format(), Format::Simultaneous);
}

#[test]
fn meta_events_are_observed_not_sent() {
    let mut events = vec![0x00, 0xFF, 0x03, 0x04];
    events.extend(b"Lead");
    events.extend([0x00, 0xFF, 0x05, 0x02]);
    events.extend(b"la");
    events.extend([0x00, 0xC0, 0x05]);
    events.extend(END);
    let file = smf(96, &[&events]);

    let (log, result) = play(&file, PlayerConfig::default());
    result.unwrap();
    assert_eq!(
        log.playback(),
        vec![
            Action::Meta(MetaType::TrackName, b"Lead".to_vec()),
            Action::Meta(MetaType::Lyric, b"la".to_vec()),
            Action::Byte(0xC0),
            Action::Byte(0x05),
            Action::Meta(MetaType::EndOfTrack, vec![]),
        ]
    );
}

#[test]
fn sysex_is_sent_with_its_terminator() {
    let file = smf(96, &[&[0x00, 0xF0, 0x05, 0x7E, 0x7F, 0x09, 0x01, 0xF7]]);
    let (log, result) = play(&file, PlayerConfig::default());
    assert_eq!(result.unwrap().sysex_events(), 1);
    // F0 05 ... reads the length byte as data, like every byte up to F7
    assert_eq!(
        log.playback(),
        bytes(&[0xF0, 0x05, 0x7E, 0x7F, 0x09, 0x01, 0xF7])
    );
}

#[test]
fn long_meta_keeps_the_stream_in_step() {
    let text = vec![b'x'; 400];
    let mut events = vec![0x00, 0xFF, 0x01];
    events.extend(vlq(text.len() as u32));
    events.extend(&text);
    events.extend([0x00, 0x90, 0x3C, 0x40]);
    let file = smf(96, &[&events]);

    let (log, result) = play(&file, PlayerConfig::default().with_payload_cap(16));
    result.unwrap();
    assert_eq!(
        log.playback(),
        vec![
            Action::Meta(MetaType::Text, vec![b'x'; 16]),
            Action::Byte(0x90),
            Action::Byte(0x3C),
            Action::Byte(0x40),
        ]
    );
}

#[test]
fn running_status_carries_across_tracks() {
    let file = smf(96, &[&[0x00, 0x90, 0x3C, 0x40], &[0x00, 0x3C, 0x00]]);
    let (log, result) = play(&file, PlayerConfig::default());
    result.unwrap();
    assert_eq!(log.playback(), bytes(&[0x90, 0x3C, 0x40, 0x90, 0x3C, 0x00]));
}

#[test]
fn running_status_reset_per_track() {
    let file = smf(96, &[&[0x00, 0x90, 0x3C, 0x40], &[0x00, 0x3C, 0x00]]);
    let config = PlayerConfig::default().with_reset_running_status_per_track(true);
    let (log, result) = play(&file, config);

    let err = result.unwrap_err();
    assert_eq!(err.track(), Some(1));
    assert!(matches!(err.error_kind(), PlayerErrorKind::BadEvent(_)));
    assert_eq!(log.playback(), bytes(&[0x90, 0x3C, 0x40]));
}

#[test]
fn stop_signal_ends_playback_and_silences() {
    use std::cell::Cell;

    let file = smf(
        96,
        &[&[0x00, 0x90, 0x3C, 0x40, 0x00, 0x90, 0x3E, 0x40, 0x00, 0x90, 0x40, 0x40]],
    );
    let log = Log::default();
    let polls = Cell::new(0);
    let mut player = Player::new(log.sink(), log.pacer()).with_stop_signal(
        smfplay::player::StopFn(|| {
            polls.set(polls.get() + 1);
            polls.get() > 2
        }),
    );

    let err = player.play(SliceSource::new(&file)).unwrap_err();
    assert!(err.is_stopped());
    assert_eq!(log.playback(), bytes(&[0x90, 0x3C, 0x40, 0x90, 0x3E, 0x40]));
}

#[test]
fn smallest_payload_cap_keeps_tempo_changes() {
    let mut events = vec![0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40];
    events.extend([0x60, 0x90, 0x3C, 0x40]);
    let file = smf(96, &[&events]);

    let (log, result) = play(&file, PlayerConfig::default().with_payload_cap(2));
    assert_eq!(result.unwrap().final_tempo(), Tempo::new(1_000_000));
    assert_eq!(log.waits(), vec![1_000_000]);
}
