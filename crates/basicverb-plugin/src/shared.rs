//! Session state shared by every plugin thread.
//!
//! `ReverbShared` lives for the lifetime of the plugin instance. It owns the
//! parameter store and the dirty flag, wires the store's change callback to
//! the flag, and hands out appliers for the audio thread.

use crate::applier::{ReverbHandles, UpdateApplier};
use crate::error::PluginError;
use crate::notifier::DirtyFlag;
use crate::params::REVERB_PARAMS;
use crate::store::ParameterStore;
use basicverb_core::ParamDescriptor;
use basicverb_effects::ReverbConfig;
use std::sync::Arc;

/// Shared state accessible from all plugin threads.
///
/// Cheap to clone; clones refer to the same session.
#[derive(Clone)]
pub struct ReverbShared {
    store: ParameterStore,
    dirty: Arc<DirtyFlag>,
    handles: ReverbHandles,
}

impl ReverbShared {
    /// Create a session for the reverb's standard layout.
    ///
    /// `host_notify` runs after every parameter change, once the dirty flag
    /// is set, so a host can schedule a process call even while transport is
    /// stopped. Pass `None` for standalone/test use.
    pub fn new(host_notify: Option<Box<dyn Fn() + Send + Sync>>) -> Result<Self, PluginError> {
        Self::with_layout(&REVERB_PARAMS, host_notify)
    }

    /// Create a session for a custom layout.
    ///
    /// The layout must declare every id the reverb reads, with the right
    /// kind; otherwise construction fails.
    pub fn with_layout(
        layout: &[ParamDescriptor],
        host_notify: Option<Box<dyn Fn() + Send + Sync>>,
    ) -> Result<Self, PluginError> {
        let dirty = Arc::new(DirtyFlag::new());
        let store = ParameterStore::new(layout, Some(dirty.notifier(host_notify)));
        let handles = ReverbHandles::resolve(&store)?;

        tracing::debug!(params = store.len(), "reverb session created");
        Ok(Self {
            store,
            dirty,
            handles,
        })
    }

    /// The session's parameter store.
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// The session's dirty flag.
    pub fn dirty_flag(&self) -> &Arc<DirtyFlag> {
        &self.dirty
    }

    /// Build an applier for this session's audio thread.
    pub fn applier(&self) -> UpdateApplier {
        UpdateApplier::new(self.store.clone(), Arc::clone(&self.dirty), self.handles)
    }

    /// Read the full configuration without touching the dirty flag.
    pub fn current_config(&self) -> ReverbConfig {
        self.handles.snapshot(&self.store)
    }
}
