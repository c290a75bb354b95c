//! ASAP layering of an operation list into time slices.

use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::debug;

use qslice_ir::{CircuitSource, Operation};

use crate::error::{ScheduleError, ScheduleResult};

/// Operations that run in the same time step.
///
/// No qubit appears in more than one operation of a slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlice(Vec<Operation>);

impl TimeSlice {
    /// Create an empty slice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations in the slice, in program order.
    pub fn operations(&self) -> &[Operation] {
        &self.0
    }

    /// Number of operations in the slice.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the slice holds no operations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, op: Operation) {
        self.0.push(op);
    }
}

impl FromIterator<Operation> for TimeSlice {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TimeSlice {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A circuit laid out as consecutive time slices.
///
/// Serializes as a plain list of slices, each a list of operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    slices: Vec<TimeSlice>,
}

impl Schedule {
    /// Number of slices.
    pub fn depth(&self) -> usize {
        self.slices.len()
    }

    /// Total number of scheduled operations.
    pub fn num_ops(&self) -> usize {
        self.slices.iter().map(TimeSlice::len).sum()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// The slices in time order.
    pub fn slices(&self) -> &[TimeSlice] {
        &self.slices
    }

    /// Operations flattened in slice order.
    pub fn iter_ops(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.slices.iter().flat_map(TimeSlice::iter)
    }

    /// Consume the schedule, yielding its slices.
    pub fn into_slices(self) -> Vec<TimeSlice> {
        self.slices
    }
}

impl Index<usize> for Schedule {
    type Output = TimeSlice;

    fn index(&self, index: usize) -> &TimeSlice {
        &self.slices[index]
    }
}

/// Group a circuit's operations into time slices.
///
/// Each operation lands one slice after the latest slice that touched any of
/// its qubits, or in slice 0 if none of them were touched yet. Operations on
/// disjoint qubits therefore share a slice while every qubit sees its
/// operations in program order.
///
/// Fails with [`ScheduleError::InvalidQubitIndex`] on the first operand
/// outside `[0, num_qubits)`; no partial schedule is returned.
///
/// ```rust
/// use qslice_ir::{Circuit, QubitId};
/// use qslice_sched::schedule;
///
/// let mut circuit = Circuit::new("bell", 2);
/// circuit.h(QubitId(0)).unwrap();
/// circuit.cx(QubitId(0), QubitId(1)).unwrap();
///
/// let schedule = schedule(&circuit).unwrap();
/// assert_eq!(schedule.depth(), 2);
/// ```
pub fn schedule<C: CircuitSource + ?Sized>(circuit: &C) -> ScheduleResult<Schedule> {
    let num_qubits = circuit.num_qubits();
    let mut last_slice: Vec<Option<usize>> = vec![None; num_qubits as usize];
    let mut slices: Vec<TimeSlice> = Vec::new();

    for op in circuit.operations() {
        let mut slice_index = 0;
        for qubit in op.qubits() {
            let last = last_slice
                .get(qubit.index())
                .ok_or_else(|| ScheduleError::InvalidQubitIndex {
                    index: qubit.0,
                    num_qubits,
                    op: op.to_string(),
                })?;
            if let Some(last) = *last {
                slice_index = slice_index.max(last + 1);
            }
        }

        for qubit in op.qubits() {
            last_slice[qubit.index()] = Some(slice_index);
        }
        if slice_index == slices.len() {
            slices.push(TimeSlice::new());
        }
        slices[slice_index].push(op.clone());
    }

    debug!(
        num_qubits,
        num_ops = circuit.num_ops(),
        depth = slices.len(),
        "scheduled circuit"
    );

    Ok(Schedule { slices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qslice_ir::{Circuit, QubitId};

    struct RawSource {
        num_qubits: u32,
        ops: Vec<Operation>,
    }

    impl CircuitSource for RawSource {
        fn num_qubits(&self) -> u32 {
            self.num_qubits
        }

        fn operations(&self) -> &[Operation] {
            &self.ops
        }
    }

    fn names(slice: &TimeSlice) -> Vec<&str> {
        slice.iter().map(Operation::name).collect()
    }

    #[test]
    fn test_dependent_chain() {
        let mut circuit = Circuit::new("chain", 3);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();

        let schedule = schedule(&circuit).unwrap();
        assert_eq!(schedule.depth(), 3);
        assert_eq!(names(&schedule[0]), ["h"]);
        assert_eq!(names(&schedule[1]), ["cx"]);
        assert_eq!(schedule[2].operations()[0].qubits(), &[QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_disjoint_gates_share_slice() {
        let mut circuit = Circuit::new("layer", 3);
        for q in 0..3 {
            circuit.h(QubitId(q)).unwrap();
        }

        let schedule = schedule(&circuit).unwrap();
        assert_eq!(schedule.depth(), 1);
        assert_eq!(schedule[0].len(), 3);
    }

    #[test]
    fn test_later_op_fills_earlier_slice() {
        // cx(0,1) pushes q0/q1 to slice 1, h(2) still fits in slice 0
        let mut circuit = Circuit::new("fill", 3);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(2)).unwrap();

        let schedule = schedule(&circuit).unwrap();
        assert_eq!(schedule.depth(), 2);
        assert_eq!(names(&schedule[0]), ["h", "h"]);
        assert_eq!(
            schedule.iter_ops().map(ToString::to_string).collect::<Vec<_>>(),
            ["h(0)", "h(2)", "cx(0,1)"]
        );
    }

    #[test]
    fn test_empty_circuit() {
        let schedule = schedule(&Circuit::new("empty", 4)).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.num_ops(), 0);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let source = RawSource {
            num_qubits: 2,
            ops: vec![
                Operation::single("h", QubitId(0)),
                Operation::two("cx", QubitId(1), QubitId(2)),
            ],
        };

        match schedule(&source) {
            Err(ScheduleError::InvalidQubitIndex {
                index,
                num_qubits,
                op,
            }) => {
                assert_eq!(index, 2);
                assert_eq!(num_qubits, 2);
                assert_eq!(op, "cx(1,2)");
            }
            other => panic!("expected InvalidQubitIndex, got {other:?}"),
        }
    }

    #[test]
    fn test_serializes_as_nested_lists() {
        let mut circuit = Circuit::new("bell", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let json = serde_json::to_value(schedule(&circuit).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                [{"name": "h", "qubits": [0]}],
                [{"name": "cx", "qubits": [0, 1]}]
            ])
        );
    }
}
