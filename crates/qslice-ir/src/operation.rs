//! Gate operations acting on qubit indices.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::qubit::QubitId;

/// A single gate application: a name and the ordered qubits it acts on.
///
/// Operations are immutable once built. The name is kept exactly as the
/// source circuit spelled it; classification (routing vs. logical) is done by
/// consumers, never by the operation itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    name: String,
    qubits: Vec<QubitId>,
}

impl Operation {
    /// Create an operation from a name and its qubit operands.
    pub fn new(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit operation.
    pub fn single(name: impl Into<String>, qubit: QubitId) -> Self {
        Self::new(name, [qubit])
    }

    /// Create a two-qubit operation.
    pub fn two(name: impl Into<String>, q1: QubitId, q2: QubitId) -> Self {
        Self::new(name, [q1, q2])
    }

    /// Gate name as written in the source circuit.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qubit operands in gate order.
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Number of qubits this operation touches.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Whether the operation couples two or more qubits.
    #[inline]
    pub fn is_multi_qubit(&self) -> bool {
        self.qubits.len() > 1
    }

    /// Case-insensitive name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether any operand equals `qubit`.
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", q.0)?;
        }
        write!(f, ")")
    }
}
