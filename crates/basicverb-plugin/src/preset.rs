//! TOML presets and the factory bank.

use crate::error::PluginError;
use crate::store::ParameterStore;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A named set of parameter values.
///
/// # TOML Format
///
/// ```toml
/// name = "Large Hall"
/// description = "Long, dark tail"
///
/// [params]
/// r_size = 0.9
/// r_damping = 0.6
/// r_wet = 0.45
/// r_freeze = false
/// ```
///
/// Boolean parameters may be written as `true`/`false` or as numbers.
/// Parameters not listed keep whatever value they had when the preset is
/// applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plain values keyed by parameter string id.
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: BTreeMap<String, f32>,
}

/// A preset value as written in TOML.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f32),
    Toggle(bool),
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<BTreeMap<String, f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, RawValue>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(id, value)| {
            let value = match value {
                RawValue::Number(v) => v,
                RawValue::Toggle(on) => {
                    if on {
                        1.0
                    } else {
                        0.0
                    }
                }
            };
            (id, value)
        })
        .collect())
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add one parameter value.
    pub fn with_param(mut self, string_id: impl Into<String>, value: f32) -> Self {
        self.params.insert(string_id.into(), value);
        self
    }

    /// Capture every current value of `store`.
    pub fn from_store(name: impl Into<String>, store: &ParameterStore) -> Self {
        let params = store
            .descriptors()
            .iter()
            .enumerate()
            .filter_map(|(i, desc)| store.get(i).map(|v| (desc.string_id.to_string(), v)))
            .collect();
        Self {
            name: name.into(),
            description: None,
            params,
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PluginError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PluginError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PluginError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| PluginError::write_file(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| PluginError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, PluginError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this preset's values into `store`.
    ///
    /// Values are clamped by the store. Ids the store does not declare are
    /// skipped with a warning. Returns how many parameters were written.
    pub fn apply(&self, store: &ParameterStore) -> usize {
        let mut applied = 0;
        for (id, &value) in &self.params {
            match store.index_of(id) {
                Some(index) => {
                    store.set(index, value);
                    applied += 1;
                }
                None => tracing::warn!(preset = %self.name, param = %id, "unknown parameter in preset"),
            }
        }
        tracing::debug!(preset = %self.name, applied, "preset applied");
        applied
    }
}

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("small_room", SMALL_ROOM_PRESET),
    ("large_hall", LARGE_HALL_PRESET),
    ("frozen_pad", FROZEN_PAD_PRESET),
    ("dry_wide", DRY_WIDE_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Every control at its default"

[params]
r_size = 0.3
r_damping = 0.3
r_wet = 0.3
r_dry = 0.3
r_width = 0.3
r_freeze = 0.0
"#;

const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, bright ambience"

[params]
r_size = 0.2
r_damping = 0.2
r_wet = 0.25
r_dry = 0.45
r_width = 0.6
r_freeze = 0.0
"#;

const LARGE_HALL_PRESET: &str = r#"
name = "Large Hall"
description = "Long, dark tail"

[params]
r_size = 0.9
r_damping = 0.6
r_wet = 0.45
r_dry = 0.3
r_width = 1.0
r_freeze = 0.0
"#;

const FROZEN_PAD_PRESET: &str = r#"
name = "Frozen Pad"
description = "Holds the tail indefinitely"

[params]
r_size = 1.0
r_damping = 0.0
r_wet = 0.6
r_dry = 0.2
r_width = 1.0
r_freeze = 1.0
"#;

const DRY_WIDE_PRESET: &str = r#"
name = "Dry Wide"
description = "Mostly dry signal with a wide, faint halo"

[params]
r_size = 0.5
r_damping = 0.4
r_wet = 0.1
r_dry = 0.5
r_width = 1.0
r_freeze = 0.0
"#;

/// All factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by slug (`large_hall`) or display name
/// (`Large Hall`). Case-insensitive.
pub fn factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(slug, toml)| Preset::from_toml(toml).ok().map(|p| (*slug, p)))
        .find(|(slug, preset)| *slug == name_lower || preset.name.to_lowercase() == name_lower)
        .map(|(_, preset)| preset)
}

/// Resolve a factory preset name or a path to a TOML file.
pub fn find_preset(name_or_path: &str) -> Result<Preset, PluginError> {
    if let Some(preset) = factory_preset(name_or_path) {
        return Ok(preset);
    }
    let path = Path::new(name_or_path);
    if path.is_file() {
        return Preset::load(path);
    }
    Err(PluginError::PresetNotFound(name_or_path.to_string()))
}
