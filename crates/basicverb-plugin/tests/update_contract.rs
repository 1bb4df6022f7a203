//! The control-to-audio update contract, exercised end to end through the
//! audio processor.

use basicverb_plugin::params::{DAMPING, DRY_LEVEL, FREEZE, ROOM_SIZE, WET_LEVEL, WIDTH};
use basicverb_plugin::{AudioConfig, ProcessMode, REVERB_PARAMS, ReverbAudioProcessor, ReverbShared};

const BLOCK: usize = 128;

struct Session {
    shared: ReverbShared,
    processor: ReverbAudioProcessor,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl Session {
    fn new(mode: ProcessMode) -> Self {
        let shared = ReverbShared::new(None).unwrap();
        let processor = ReverbAudioProcessor::activate(
            &shared,
            AudioConfig {
                sample_rate: 48000.0,
                max_block_size: BLOCK,
                mode,
            },
        )
        .unwrap();
        Self {
            shared,
            processor,
            left: vec![0.0; BLOCK],
            right: vec![0.0; BLOCK],
        }
    }

    fn set(&self, id: &str, value: f32) {
        let store = self.shared.store();
        store.set(store.index_of(id).unwrap(), value);
    }

    fn block(&mut self) {
        self.processor
            .process(&mut [self.left.as_mut_slice(), self.right.as_mut_slice()]);
    }
}

#[test]
fn room_size_change_is_applied_once() {
    let mut session = Session::new(ProcessMode::Realtime);
    assert!(!session.shared.dirty_flag().is_set());
    let before = session.processor.rebuild_count();

    session.set(ROOM_SIZE, 0.9);
    session.block();

    let config = session.processor.config();
    assert_eq!(config.room_size, 0.9);
    assert_eq!(config.damping, 0.3);
    assert_eq!(config.wet_level, 0.3);
    assert_eq!(config.dry_level, 0.3);
    assert_eq!(config.width, 0.3);
    assert!(!config.freeze);
    assert_eq!(session.processor.rebuild_count(), before + 1);

    // No mutation: the flag check fails and the engine keeps 0.9
    session.block();
    assert_eq!(session.processor.rebuild_count(), before + 1);
    assert_eq!(session.processor.config().room_size, 0.9);
}

#[test]
fn idle_blocks_never_rebuild() {
    let mut session = Session::new(ProcessMode::Realtime);
    for _ in 0..50 {
        session.block();
    }
    assert_eq!(session.processor.rebuild_count(), 0);
}

#[test]
fn simultaneous_edits_coalesce() {
    let mut session = Session::new(ProcessMode::Realtime);
    session.set(DAMPING, 0.6);
    session.set(WET_LEVEL, 0.8);
    session.block();

    let config = session.processor.config();
    assert_eq!(config.damping, 0.6);
    assert_eq!(config.wet_level, 0.8);
    assert_eq!(session.processor.rebuild_count(), 1);
}

#[test]
fn offline_rebuilds_every_block() {
    let mut session = Session::new(ProcessMode::Offline);
    for _ in 0..10 {
        session.block();
    }
    assert_eq!(session.processor.rebuild_count(), 10);

    session.set(WIDTH, 0.9);
    session.block();
    assert_eq!(session.processor.rebuild_count(), 11);
    assert_eq!(session.processor.config().width, 0.9);
}

#[test]
fn mode_switch_takes_effect_next_block() {
    let mut session = Session::new(ProcessMode::Realtime);
    session.block();
    assert_eq!(session.processor.rebuild_count(), 0);

    session.processor.set_mode(ProcessMode::Offline);
    assert_eq!(session.processor.mode(), ProcessMode::Offline);
    session.block();
    session.block();
    assert_eq!(session.processor.rebuild_count(), 2);

    session.processor.set_mode(ProcessMode::Realtime);
    session.block();
    assert_eq!(session.processor.rebuild_count(), 2);
}

#[test]
fn extremes_clamp_at_the_store() {
    let mut session = Session::new(ProcessMode::Realtime);
    for desc in &REVERB_PARAMS {
        session.set(desc.string_id, desc.max);
    }
    session.block();
    let config = session.processor.config();
    assert_eq!(config.room_size, 1.0);
    assert_eq!(config.dry_level, 1.0);
    assert!(config.freeze);

    for desc in &REVERB_PARAMS {
        session.set(desc.string_id, desc.min - 10.0);
    }
    session.block();
    let config = session.processor.config();
    assert_eq!(config.room_size, 0.0);
    assert_eq!(config.width, 0.0);
    assert!(!config.freeze);

    for desc in &REVERB_PARAMS {
        let index = session.shared.store().index_of(desc.string_id).unwrap();
        assert_eq!(session.shared.store().get(index), Some(desc.min));
    }
}

#[test]
fn each_parameter_reaches_its_own_field() {
    let mut session = Session::new(ProcessMode::Realtime);
    session.set(ROOM_SIZE, 0.11);
    session.set(DAMPING, 0.22);
    session.set(WET_LEVEL, 0.33);
    session.set(DRY_LEVEL, 0.44);
    session.set(WIDTH, 0.55);
    session.set(FREEZE, 1.0);
    session.block();

    let config = session.processor.config();
    assert_eq!(config.room_size, 0.11);
    assert_eq!(config.damping, 0.22);
    assert_eq!(config.wet_level, 0.33);
    assert_eq!(config.dry_level, 0.44);
    assert_eq!(config.width, 0.55);
    assert!(config.freeze);
}

#[test]
fn mutation_after_drain_waits_one_block() {
    let mut session = Session::new(ProcessMode::Realtime);
    session.set(ROOM_SIZE, 0.5);
    session.block();
    session.set(ROOM_SIZE, 0.7);
    assert_eq!(session.processor.config().room_size, 0.5);
    session.block();
    assert_eq!(session.processor.config().room_size, 0.7);
}

#[test]
fn reset_keeps_configuration() {
    let mut session = Session::new(ProcessMode::Realtime);
    session.set(WET_LEVEL, 1.0);
    session.left.fill(0.5);
    session.right.fill(0.5);
    session.block();

    session.processor.reset();
    assert_eq!(session.processor.config().wet_level, 1.0);
    assert_eq!(session.processor.rebuild_count(), 1);
}
