//! Error types for topology generation and coupling-map files.

use thiserror::Error;

/// Errors raised while building or loading coupling graphs.
///
/// Generators fail before producing any edges: a caller never receives a
/// partially built graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopologyError {
    /// Requested qubit budget (or core size) is zero.
    #[error("Invalid size for {topology}: {size}")]
    InvalidSize {
        /// Topology or component being sized.
        topology: String,
        /// The rejected size.
        size: u32,
    },

    /// A generator parameter is out of its domain (e.g. an even distance).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Edge refers to a qubit outside the graph or connects a qubit to itself.
    #[error("Invalid edge ({a}, {b}) on a {num_qubits}-qubit graph")]
    InvalidEdge {
        /// First endpoint.
        a: u32,
        /// Second endpoint.
        b: u32,
        /// Number of qubits in the graph.
        num_qubits: u32,
    },

    /// Coupling-map record is missing a field or holds a bad value.
    #[error("Malformed coupling map file: field '{field}': {reason}")]
    MalformedCouplingMapFile {
        /// The offending field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Reading or writing a coupling-map file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Coupling-map JSON is not syntactically valid.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TopologyError {
    pub(crate) fn malformed(field: &str, reason: impl Into<String>) -> Self {
        TopologyError::MalformedCouplingMapFile {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
