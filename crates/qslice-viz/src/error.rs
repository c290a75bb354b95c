//! Error types for the visualization layer.

use thiserror::Error;

use qslice_ir::IrError;
use qslice_sched::ScheduleError;
use qslice_topo::TopologyError;

/// Errors raised while collecting circuits or exporting a bundle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VizError {
    /// Export was requested before any circuit was added.
    #[error("No circuits added; add at least one circuit before exporting")]
    EmptyCollection,

    /// A settings map names a key that is not a known setting.
    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    /// A setting has the wrong type or is out of range.
    #[error("Invalid value for setting '{key}': {reason}")]
    InvalidSetting {
        /// Setting key.
        key: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// Circuit model error.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Scheduling error.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Topology error.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error in a settings file.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        VizError::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for visualization operations.
pub type VizResult<T> = Result<T, VizError>;
