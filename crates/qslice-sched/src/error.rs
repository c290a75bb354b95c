//! Error types for scheduling.

use thiserror::Error;

/// Errors raised while slicing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleError {
    /// An operation references a qubit outside `[0, num_qubits)`.
    ///
    /// A `qslice_ir::Circuit` already rejects such operations on
    /// construction (`IrError::QubitNotFound`); this covers other
    /// `CircuitSource` implementations.
    #[error("Qubit index {index} out of range for {num_qubits}-qubit circuit in operation '{op}'")]
    InvalidQubitIndex {
        /// Offending qubit index.
        index: u32,
        /// Declared qubit count of the circuit.
        num_qubits: u32,
        /// The operation, rendered as `name(q0,q1,...)`.
        op: String,
    },
}

/// Result type for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
