//! Error types for the plugin adapter.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a session, restoring state, or handling
/// presets.
///
/// None of these can occur on the audio thread: everything the processing
/// path needs is resolved before `activate` returns.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A string id did not resolve to any declared parameter
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A string id resolved, but to a parameter of the wrong kind
    #[error("parameter '{id}' is {found}, expected {expected}")]
    KindMismatch {
        /// String id that was looked up.
        id: String,
        /// Kind the caller asked for.
        expected: &'static str,
        /// Kind the layout declares.
        found: &'static str,
    },

    /// The host asked for a sample rate the engine cannot run at
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// State bytes parsed but do not have the expected shape
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// State bytes are not valid JSON
    #[error("failed to parse state JSON: {0}")]
    StateJson(#[from] serde_json::Error),

    /// Reading or writing the host's state stream failed
    #[error("state stream error: {0}")]
    StateIo(#[from] std::io::Error),

    /// Failed to parse a TOML preset
    #[error("failed to parse preset: {0}")]
    PresetParse(#[from] toml::de::Error),

    /// Failed to serialize a TOML preset
    #[error("failed to serialize preset: {0}")]
    PresetSerialize(#[from] toml::ser::Error),

    /// No factory preset or file matched
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PluginError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PluginError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PluginError::WriteFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = PluginError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, PluginError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn write_file_display() {
        let err = PluginError::write_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to write file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn kind_mismatch_display() {
        let err = PluginError::KindMismatch {
            id: "r_freeze".to_string(),
            expected: "continuous",
            found: "boolean",
        };
        assert_eq!(
            err.to_string(),
            "parameter 'r_freeze' is boolean, expected continuous"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_parameter_display() {
        let err = PluginError::UnknownParameter("r_predelay".to_string());
        assert_eq!(err.to_string(), "unknown parameter 'r_predelay'");
    }

    #[test]
    fn state_json_wraps_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PluginError::from(json_err);
        assert!(matches!(err, PluginError::StateJson(_)));
        assert!(err.to_string().starts_with("failed to parse state JSON"));
    }

    #[test]
    fn preset_not_found_display() {
        let err = PluginError::PresetNotFound("Cathedral".to_string());
        assert_eq!(err.to_string(), "preset not found: Cathedral");
    }
}
