//! Main-thread surface of the reverb plugin.
//!
//! Handles parameter metadata queries, state save/restore, bus layout
//! negotiation and the (single) host program. Nothing here runs on the
//! audio thread.

use crate::error::PluginError;
use crate::shared::ReverbShared;
use basicverb_core::{ParamFlags, ParamId, ParamKind};
use std::io::{Read, Write};

/// Parameter metadata as reported to a host.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    /// Stable numeric id.
    pub id: ParamId,
    /// Stable string id, used in state and presets.
    pub string_id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Continuous or boolean.
    pub kind: ParamKind,
    /// Minimum plain value.
    pub min_value: f64,
    /// Maximum plain value.
    pub max_value: f64,
    /// Default plain value.
    pub default_value: f64,
    /// Capability flags.
    pub flags: ParamFlags,
}

/// Main-thread state for the reverb plugin.
pub struct ReverbMainThread<'a> {
    shared: &'a ReverbShared,
}

impl<'a> ReverbMainThread<'a> {
    /// Create a new main-thread handler referencing the shared state.
    pub fn new(shared: &'a ReverbShared) -> Self {
        Self { shared }
    }

    // ── Parameters ──────────────────────────────────────────────────────

    /// Number of parameters.
    pub fn param_count(&self) -> u32 {
        self.shared.store().len() as u32
    }

    /// Metadata for the parameter at `index`.
    pub fn param_info(&self, index: u32) -> Option<ParamInfo> {
        let desc = self.shared.store().descriptor(index as usize)?;
        Some(ParamInfo {
            id: desc.id,
            string_id: desc.string_id,
            name: desc.name,
            kind: desc.kind,
            min_value: f64::from(desc.min),
            max_value: f64::from(desc.max),
            default_value: f64::from(desc.default),
            flags: desc.flags,
        })
    }

    /// Current plain value of a parameter.
    pub fn get_value(&self, id: ParamId) -> Option<f64> {
        let store = self.shared.store();
        let index = store.index_by_id(id)?;
        store.get(index).map(f64::from)
    }

    /// Apply a host automation value. Returns `true` if the value changed.
    pub fn set_value(&self, id: ParamId, value: f64) -> bool {
        let store = self.shared.store();
        store
            .index_by_id(id)
            .is_some_and(|index| store.set(index, value as f32))
    }

    /// Format a value for host display.
    ///
    /// Continuous values show two decimals, booleans show `On`/`Off`.
    /// Unknown ids fall back to two decimals.
    pub fn value_to_text(&self, id: ParamId, value: f64) -> String {
        let store = self.shared.store();
        match store.index_by_id(id).and_then(|i| store.descriptor(i)) {
            Some(desc) => desc.format_value(value as f32),
            None => format!("{value:.2}"),
        }
    }

    /// Parse host-entered text back to a plain value.
    pub fn text_to_value(&self, id: ParamId, text: &str) -> Option<f64> {
        let store = self.shared.store();
        let desc = store.descriptor(store.index_by_id(id)?)?;
        desc.parse_value(text).map(f64::from)
    }

    // ── State ───────────────────────────────────────────────────────────

    /// Write the session state.
    ///
    /// The format is a JSON object mapping each stable string id to its
    /// plain value:
    ///
    /// ```json
    /// {"r_size": 0.3, "r_damping": 0.3, "r_freeze": 0.0}
    /// ```
    pub fn save_state(&self, output: &mut impl Write) -> Result<(), PluginError> {
        let store = self.shared.store();
        let mut state = serde_json::Map::new();

        for (i, desc) in store.descriptors().iter().enumerate() {
            if let Some(value) = store.get(i) {
                state.insert(
                    desc.string_id.to_string(),
                    serde_json::Value::from(f64::from(value)),
                );
            }
        }

        let json = serde_json::to_vec(&serde_json::Value::Object(state))?;
        output.write_all(&json)?;
        Ok(())
    }

    /// Restore session state written by [`save_state`](Self::save_state).
    ///
    /// Unknown keys and non-numeric values are skipped, values are clamped,
    /// and booleans are accepted for boolean parameters. Every value that
    /// changes marks the session dirty, so the audio thread picks up the
    /// restored configuration on its next block. Returns how many
    /// parameters were recognised.
    pub fn load_state(&self, input: &mut impl Read) -> Result<usize, PluginError> {
        let mut buf = Vec::new();
        input.read_to_end(&mut buf)?;

        let value: serde_json::Value = serde_json::from_slice(&buf)?;
        let Some(obj) = value.as_object() else {
            return Err(PluginError::InvalidState(
                "state is not a JSON object".to_string(),
            ));
        };

        let store = self.shared.store();
        let mut recognised = 0;
        for (key, val) in obj {
            let Some(index) = store.index_of(key) else {
                tracing::debug!(key = %key, "ignoring unknown state key");
                continue;
            };
            let number = val
                .as_f64()
                .or_else(|| val.as_bool().map(|on| if on { 1.0 } else { 0.0 }));
            let Some(v) = number else {
                tracing::debug!(key = %key, "ignoring non-numeric state value");
                continue;
            };
            store.set(index, v as f32);
            recognised += 1;
        }

        tracing::info!(recognised, "state loaded");
        Ok(recognised)
    }

    // ── Audio ports ─────────────────────────────────────────────────────

    /// Whether a bus layout can be used.
    ///
    /// Output must be mono or stereo, and input must match output.
    pub fn is_layout_supported(&self, input_channels: usize, output_channels: usize) -> bool {
        matches!(output_channels, 1 | 2) && input_channels == output_channels
    }

    // ── Programs ────────────────────────────────────────────────────────

    /// Number of host programs. Always one: some hosts misbehave with zero.
    pub fn program_count(&self) -> u32 {
        1
    }

    /// Index of the active program.
    pub fn current_program(&self) -> u32 {
        0
    }

    /// Select a program. Only index 0 exists.
    pub fn set_current_program(&self, index: u32) -> bool {
        index == 0
    }

    /// Name of a program. The only program is unnamed.
    pub fn program_name(&self, index: u32) -> Option<&'static str> {
        (index == 0).then_some("")
    }
}
