//! Circuits: a qubit count plus operations in program order.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IrError, IrResult};
use crate::operation::Operation;
use crate::qubit::QubitId;

/// Anything that can hand the scheduler a qubit count and an ordered
/// operation list.
///
/// [`Circuit`] is the in-crate implementation. Circuits produced by other
/// frontends or an external compiler implement this trait directly instead of
/// being copied into a `Circuit`.
pub trait CircuitSource {
    /// Number of qubits the circuit declares.
    fn num_qubits(&self) -> u32;

    /// Operations in program order.
    fn operations(&self) -> &[Operation];

    /// Total number of operations.
    fn num_ops(&self) -> usize {
        self.operations().len()
    }
}

/// A quantum circuit as an ordered list of operations.
///
/// Builder methods validate qubit operands against the declared size, so a
/// `Circuit` built through this API always satisfies the scheduler's input
/// constraint.
///
/// ```rust
/// use qslice_ir::{Circuit, CircuitSource, QubitId};
///
/// let mut circuit = Circuit::new("bell", 2);
/// circuit.h(QubitId(0)).unwrap();
/// circuit.cx(QubitId(0), QubitId(1)).unwrap();
///
/// assert_eq!(circuit.num_qubits(), 2);
/// assert_eq!(circuit.num_ops(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CircuitRepr")]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    operations: Vec<Operation>,
}

/// Unvalidated wire form of a [`Circuit`].
#[derive(Deserialize)]
struct CircuitRepr {
    #[serde(default)]
    name: String,
    num_qubits: u32,
    #[serde(default)]
    operations: Vec<Operation>,
}

impl TryFrom<CircuitRepr> for Circuit {
    type Error = IrError;

    fn try_from(repr: CircuitRepr) -> IrResult<Self> {
        Circuit::from_operations(repr.name, repr.num_qubits, repr.operations)
    }
}

impl Circuit {
    /// Create an empty circuit with `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            operations: vec![],
        }
    }

    /// Build a circuit from a prepared operation list, validating every
    /// operation.
    pub fn from_operations(
        name: impl Into<String>,
        num_qubits: u32,
        operations: impl IntoIterator<Item = Operation>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name, num_qubits);
        for op in operations {
            circuit.push(op)?;
        }
        Ok(circuit)
    }

    /// Parse a circuit from its JSON form.
    pub fn from_json_str(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a circuit from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> IrResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Name of the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append an operation after checking its operands.
    pub fn push(&mut self, op: Operation) -> IrResult<&mut Self> {
        self.validate(&op)?;
        self.operations.push(op);
        Ok(self)
    }

    /// Apply a named gate to the given qubits.
    pub fn apply(
        &mut self,
        name: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Operation::new(name, qubits))
    }

    fn validate(&self, op: &Operation) -> IrResult<()> {
        if op.qubits().is_empty() {
            return Err(IrError::EmptyQubits(op.name().to_string()));
        }
        for (i, &qubit) in op.qubits().iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: Some(op.name().to_string()),
                });
            }
            if op.qubits()[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(op.name().to_string()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply("h", [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply("x", [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply("y", [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply("z", [qubit])
    }

    /// Apply a measurement.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply("measure", [qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply("cx", [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply("cz", [q1, q2])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply("swap", [q1, q2])
    }
}

impl CircuitSource for Circuit {
    fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl<T: CircuitSource + ?Sized> CircuitSource for &T {
    fn num_qubits(&self) -> u32 {
        (**self).num_qubits()
    }

    fn operations(&self) -> &[Operation] {
        (**self).operations()
    }
}
