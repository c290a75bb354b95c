//! End-to-end tests: circuits and coupling maps from JSON files through a
//! session to an exported bundle.

use qslice_ir::{Circuit, CircuitSource, QubitId};
use qslice_sched::{RoutingClassifier, analyze_overhead};
use qslice_topo::{CoreArrangement, CoreTopology, CouplingMapFile, ModularSpec, line, ring};
use qslice_viz::{CircuitKind, CircuitOptions, ExportConfig, Session, SettingsOverrides, VizError};
use serde_json::Value;

fn ghz(n: u32) -> Circuit {
    let mut circuit = Circuit::new("ghz", n);
    circuit.h(QubitId(0)).unwrap();
    for q in 1..n {
        circuit.cx(QubitId(0), QubitId(q)).unwrap();
    }
    circuit
}

/// GHZ on a line: fan-out from qubit 0 needs a SWAP chain.
fn ghz_on_line(n: u32) -> Circuit {
    let mut circuit = Circuit::new("ghz_routed", n);
    circuit.h(QubitId(0)).unwrap();
    for q in 1..n {
        circuit.cx(QubitId(q - 1), QubitId(q)).unwrap();
        if q + 1 < n {
            circuit.swap(QubitId(q - 1), QubitId(q)).unwrap();
        }
    }
    circuit
}

#[test]
fn files_to_bundle() {
    let dir = tempfile::tempdir().unwrap();

    let circuit_path = dir.path().join("compiled.json");
    std::fs::write(&circuit_path, ghz_on_line(4).to_json_pretty().unwrap()).unwrap();

    let map_path = dir.path().join("line4.json");
    CouplingMapFile::from(&line(4).unwrap()).write(&map_path).unwrap();

    let compiled = Circuit::from_path(&circuit_path).unwrap();
    let device = CouplingMapFile::from_path(&map_path).unwrap().to_graph().unwrap();

    let mut session = Session::new();
    session.add_circuit(&ghz(4), None, Some("ghz"), None).unwrap();
    session
        .add_circuit_with(
            &compiled,
            CircuitOptions::new()
                .device(&device)
                .device_source(map_path.display().to_string())
                .original_gates(ghz(4).num_ops()),
        )
        .unwrap();

    let out = dir.path().join("bundle.json");
    session
        .export()
        .unwrap()
        .to_file(&out, &ExportConfig { pretty: false })
        .unwrap();

    let bundle: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(bundle["total_circuits"], 2);
    let compiled = &bundle["circuits"][1];
    assert_eq!(compiled["circuit_type"], "compiled");
    assert_eq!(compiled["circuit_stats"]["original_gates"], 4);
    assert_eq!(compiled["circuit_stats"]["swap_count"], 2);
    assert_eq!(compiled["device_info"]["num_qubits_on_device"], 4);
    assert_eq!(
        compiled["routing_info"]["routing_slices"].as_array().unwrap().len(),
        compiled["circuit_info"]["slices"].as_array().unwrap().len()
    );
}

#[test]
fn overhead_matches_session_counts() {
    let logical = ghz(5);
    let compiled = ghz_on_line(5);
    let device = line(5).unwrap();

    let mut session = Session::new();
    let record = session.add_circuit(&compiled, Some(&device), None, None).unwrap();
    let report = analyze_overhead(&logical, &compiled, &RoutingClassifier::default()).unwrap();

    let routing = record.routing().unwrap();
    assert_eq!(report.swap_count, routing.total_swap_count);
    assert_eq!(report.routing_depth, routing.routing_depth);
    assert_eq!(report.compiled_depth, record.stats().depth);
    assert!(report.routing_overhead_depth > 0);
}

#[test]
fn modular_device_keeps_core_structure() {
    let device = ModularSpec::new(2, 3, CoreTopology::AllToAll, CoreArrangement::Ring)
        .build()
        .unwrap();
    let mut compiled = Circuit::new("cross_core", 6);
    compiled.swap(QubitId(2), QubitId(3)).unwrap();
    compiled.cx(QubitId(3), QubitId(4)).unwrap();

    let mut session = Session::new();
    session.add_circuit(&compiled, Some(&device), None, None).unwrap();
    let bundle = session.export().unwrap().to_value().unwrap();

    let modular = &bundle["circuits"][0]["device_info"]["modular"];
    assert_eq!(modular["num_cores"], 2);
    assert_eq!(modular["inter_core_links"], serde_json::json!([[2, 3]]));
}

#[test]
fn line_and_ring_devices_differ_by_wraparound() {
    let circuit = ghz(5);
    let mut session = Session::new();
    session.add_circuit(&circuit, Some(&line(5).unwrap()), None, None).unwrap();
    session.add_circuit(&circuit, Some(&ring(5).unwrap()), None, None).unwrap();

    let line_map = &session.records()[0].device().coupling_map;
    let ring_map = &session.records()[1].device().coupling_map;
    assert_eq!(ring_map.len(), line_map.len() + 1);
    assert!(ring_map.contains(&[0, 4]));
    assert!(!line_map.contains(&[0, 4]));
}

#[test]
fn per_circuit_settings_are_isolated() {
    let mut session = Session::new();
    let big = SettingsOverrides::from_pairs([("qubit_size", "4.0")]).unwrap();
    session.add_circuit(&ghz(3), None, None, Some(big)).unwrap();
    session.add_circuit(&ghz(3), None, None, None).unwrap();

    let bundle = session.export().unwrap().to_value().unwrap();
    assert_eq!(bundle["circuits"][0]["settings"]["qubit_size"], 4.0);
    assert_eq!(bundle["circuits"][1]["settings"]["qubit_size"], 1.5);
    assert_eq!(bundle["settings"]["qubit_size"], 1.5);
    assert!(session.records().iter().all(|r| r.kind() == CircuitKind::Logical));
}

#[test]
fn unknown_setting_never_reaches_the_session() {
    let err = SettingsOverrides::from_pairs([("glow", "1")]).unwrap_err();
    assert!(matches!(err, VizError::UnknownSetting(_)));
}
