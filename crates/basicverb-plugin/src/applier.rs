//! Audio-thread side of the update contract.
//!
//! Once per block the applier test-and-clears the session's dirty flag. If
//! it was set, or the host is rendering offline, every parameter is read
//! through its handle and a fresh [`ReverbConfig`] is built.

use crate::error::PluginError;
use crate::notifier::DirtyFlag;
use crate::params::{DAMPING, DRY_LEVEL, FREEZE, ROOM_SIZE, WET_LEVEL, WIDTH};
use crate::store::{BoolHandle, FloatHandle, ParameterStore};
use basicverb_effects::ReverbConfig;
use std::sync::Arc;

/// Whether the host has a wall-clock deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Live playback; reconfigure only when something changed.
    #[default]
    Realtime,
    /// Export or bounce; reconfigure every block so output never depends
    /// on where block boundaries fell.
    Offline,
}

/// One handle per field of [`ReverbConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ReverbHandles {
    room_size: FloatHandle,
    damping: FloatHandle,
    wet_level: FloatHandle,
    dry_level: FloatHandle,
    width: FloatHandle,
    freeze: BoolHandle,
}

impl ReverbHandles {
    /// Resolve every handle against `store`.
    ///
    /// Fails if any id is missing or has the wrong kind. This is a layout
    /// bug, so it surfaces when the session is built rather than later.
    pub fn resolve(store: &ParameterStore) -> Result<Self, PluginError> {
        Ok(Self {
            room_size: store.float_handle(ROOM_SIZE)?,
            damping: store.float_handle(DAMPING)?,
            wet_level: store.float_handle(WET_LEVEL)?,
            dry_level: store.float_handle(DRY_LEVEL)?,
            width: store.float_handle(WIDTH)?,
            freeze: store.bool_handle(FREEZE)?,
        })
    }

    /// Read every parameter into a configuration.
    pub fn snapshot(&self, store: &ParameterStore) -> ReverbConfig {
        ReverbConfig {
            room_size: store.read_float(self.room_size),
            damping: store.read_float(self.damping),
            wet_level: store.read_float(self.wet_level),
            dry_level: store.read_float(self.dry_level),
            width: store.read_float(self.width),
            freeze: store.read_bool(self.freeze),
        }
    }
}

/// Decides, once per block, whether the engine needs a new configuration.
pub struct UpdateApplier {
    store: ParameterStore,
    dirty: Arc<DirtyFlag>,
    handles: ReverbHandles,
    rebuilds: u64,
}

impl UpdateApplier {
    /// Create an applier over an already-resolved set of handles.
    pub fn new(store: ParameterStore, dirty: Arc<DirtyFlag>, handles: ReverbHandles) -> Self {
        Self {
            store,
            dirty,
            handles,
            rebuilds: 0,
        }
    }

    /// Run at the start of every block.
    ///
    /// The flag is always consumed first, so a mutation that lands after this
    /// call is picked up by the next block even in offline mode.
    #[inline]
    pub fn apply(&mut self, mode: ProcessMode) -> Option<ReverbConfig> {
        let dirty = self.dirty.take();
        if !dirty && mode == ProcessMode::Realtime {
            return None;
        }
        self.rebuilds += 1;
        Some(self.handles.snapshot(&self.store))
    }

    /// Clear the flag and read the full configuration unconditionally.
    ///
    /// Used at activation. Not counted in [`rebuild_count`](Self::rebuild_count).
    pub fn sync(&mut self) -> ReverbConfig {
        self.dirty.take();
        self.handles.snapshot(&self.store)
    }

    /// How many times [`apply`](Self::apply) has rebuilt a configuration.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}
