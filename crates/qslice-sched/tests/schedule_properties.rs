//! Property-based tests for slice scheduling and routing analysis.

use proptest::prelude::*;
use qslice_ir::{Circuit, CircuitSource, Operation, QubitId};
use qslice_sched::{RoutingClassifier, analyze_overhead, extract_routing, schedule};

const GATE_NAMES: [&str; 8] = ["h", "x", "rz", "cx", "cz", "swap", "SWAP", "bridge"];

/// Random circuit: each op picks a name and 1-3 distinct qubits.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..12).prop_flat_map(|num_qubits| {
        let op = (
            0..GATE_NAMES.len(),
            proptest::sample::subsequence(
                (0..num_qubits).collect::<Vec<_>>(),
                1..=3_usize.min(num_qubits as usize),
            ),
            any::<u64>(),
        )
            .prop_map(|(name, mut qubits, seed)| {
                // subsequence keeps ascending order; rotate for some variety
                let len = qubits.len();
                qubits.rotate_left((seed as usize) % len);
                Operation::new(GATE_NAMES[name], qubits.into_iter().map(QubitId))
            });
        proptest::collection::vec(op, 0..60).prop_map(move |ops| {
            Circuit::from_operations("random", num_qubits, ops).unwrap()
        })
    })
}

/// Slice index of every operation, in program order.
fn slice_indices(circuit: &Circuit) -> Vec<usize> {
    let schedule = schedule(circuit).unwrap();
    let mut remaining: Vec<(usize, &Operation)> = schedule
        .slices()
        .iter()
        .enumerate()
        .flat_map(|(i, slice)| slice.iter().map(move |op| (i, op)))
        .collect();

    circuit
        .operations()
        .iter()
        .map(|op| {
            let pos = remaining.iter().position(|(_, o)| *o == op).unwrap();
            remaining.remove(pos).0
        })
        .collect()
}

proptest! {
    #[test]
    fn every_operation_scheduled_once(circuit in arb_circuit()) {
        let schedule = schedule(&circuit).unwrap();
        prop_assert_eq!(schedule.num_ops(), circuit.num_ops());
        prop_assert!(schedule.slices().iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn slices_never_reuse_a_qubit(circuit in arb_circuit()) {
        let schedule = schedule(&circuit).unwrap();
        for slice in schedule.slices() {
            let mut used = vec![false; circuit.num_qubits() as usize];
            for q in slice.iter().flat_map(|op| op.qubits()) {
                prop_assert!(!used[q.index()], "qubit {} used twice in a slice", q);
                used[q.index()] = true;
            }
        }
    }

    #[test]
    fn per_qubit_slices_strictly_increase(circuit in arb_circuit()) {
        let indices = slice_indices(&circuit);
        for q in 0..circuit.num_qubits() {
            let touched: Vec<usize> = circuit
                .operations()
                .iter()
                .zip(&indices)
                .filter(|(op, _)| op.touches(QubitId(q)))
                .map(|(_, &i)| i)
                .collect();
            prop_assert!(touched.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn rescheduling_flattened_order_is_stable(circuit in arb_circuit()) {
        let first = schedule(&circuit).unwrap();
        let flattened = Circuit::from_operations(
            "flattened",
            circuit.num_qubits(),
            first.iter_ops().cloned(),
        )
        .unwrap();
        prop_assert_eq!(schedule(&flattened).unwrap(), first);
    }

    #[test]
    fn routing_slices_align_with_schedule(circuit in arb_circuit()) {
        let classifier = RoutingClassifier::default();
        let schedule = schedule(&circuit).unwrap();
        let routing = extract_routing(&circuit, &classifier).unwrap();

        prop_assert_eq!(routing.routing_slices.len(), schedule.depth());
        for (full, routed) in schedule.slices().iter().zip(&routing.routing_slices) {
            let expected: Vec<&Operation> =
                full.iter().filter(|op| classifier.is_routing(op)).collect();
            prop_assert_eq!(routed.iter().collect::<Vec<_>>(), expected);
        }
        prop_assert!(routing.total_swap_count <= routing.total_routing_op_count);
        prop_assert!(routing.routing_depth <= schedule.depth());
    }

    #[test]
    fn overhead_percentage_is_bounded(logical in arb_circuit(), compiled in arb_circuit()) {
        let report = analyze_overhead(&logical, &compiled, &RoutingClassifier::default()).unwrap();
        prop_assert!((0.0..=100.0).contains(&report.routing_overhead_percentage));
        if report.routing_op_count == 0 {
            prop_assert_eq!(report.routing_overhead_percentage, 0.0);
            prop_assert_eq!(report.routing_depth, 0);
        }
        prop_assert!(report.compiled_depth >= report.routing_overhead_depth);
    }
}

#[test]
fn chain_and_layer_examples() {
    let mut chain = Circuit::new("chain", 3);
    chain.h(QubitId(0)).unwrap();
    chain.cx(QubitId(0), QubitId(1)).unwrap();
    chain.cx(QubitId(1), QubitId(2)).unwrap();
    assert_eq!(schedule(&chain).unwrap().depth(), 3);

    let mut layer = Circuit::new("layer", 3);
    for q in 0..3 {
        layer.h(QubitId(q)).unwrap();
    }
    assert_eq!(schedule(&layer).unwrap().depth(), 1);
}
