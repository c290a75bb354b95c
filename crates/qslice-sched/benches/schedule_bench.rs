//! Benchmarks for slice scheduling
//!
//! Run with: cargo bench -p qslice-sched

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use qslice_ir::{Circuit, CircuitSource, QubitId};
use qslice_sched::{RoutingClassifier, analyze_overhead, extract_routing, schedule};

/// Brickwork of CX layers with an H layer in front.
fn brickwork(num_qubits: u32, layers: u32) -> Circuit {
    let mut circuit = Circuit::new("brickwork", num_qubits);
    for q in 0..num_qubits {
        circuit.h(QubitId(q)).unwrap();
    }
    for layer in 0..layers {
        let mut q = layer % 2;
        while q + 1 < num_qubits {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
            q += 2;
        }
    }
    circuit
}

/// Same brickwork with a SWAP after every fourth CX.
fn routed_brickwork(num_qubits: u32, layers: u32) -> Circuit {
    let mut circuit = Circuit::new("routed", num_qubits);
    let mut count = 0;
    for layer in 0..layers {
        let mut q = layer % 2;
        while q + 1 < num_qubits {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
            count += 1;
            if count % 4 == 0 {
                circuit.swap(QubitId(q), QubitId(q + 1)).unwrap();
            }
            q += 2;
        }
    }
    circuit
}

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");

    for num_qubits in &[100_u32, 1_000, 10_000] {
        let circuit = brickwork(*num_qubits, 20);
        group.throughput(Throughput::Elements(circuit.num_ops() as u64));
        group.bench_with_input(
            BenchmarkId::new("brickwork", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| schedule(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    let classifier = RoutingClassifier::default();

    for num_qubits in &[1_000_u32, 10_000] {
        let logical = brickwork(*num_qubits, 20);
        let compiled = routed_brickwork(*num_qubits, 20);

        group.bench_with_input(
            BenchmarkId::new("extract", num_qubits),
            &compiled,
            |b, compiled| {
                b.iter(|| extract_routing(black_box(compiled), &classifier).unwrap());
            },
        );
        group.bench_with_input(
            BenchmarkId::new("overhead", num_qubits),
            &(logical, compiled),
            |b, (logical, compiled)| {
                b.iter(|| analyze_overhead(black_box(logical), black_box(compiled), &classifier).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_schedule, bench_routing);
criterion_main!(benches);
