//! Per-circuit visualization records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use qslice_sched::{RoutingSummary, Schedule};
use qslice_topo::{CouplingGraph, ModularInfo};

use crate::settings::SettingsOverrides;

/// Whether a circuit is the pre-mapping or post-mapping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitKind {
    /// Not yet mapped onto hardware.
    Logical,
    /// Mapped onto a coupling graph by a compiler.
    Compiled,
}

impl CircuitKind {
    /// Lowercase tag used in bundles.
    pub fn as_str(self) -> &'static str {
        match self {
            CircuitKind::Logical => "logical",
            CircuitKind::Compiled => "compiled",
        }
    }
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The device a circuit runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Where the coupling map came from (file path or a fixed tag).
    pub source: String,
    /// Topology tag; `logical` for unmapped circuits.
    pub topology_type: String,
    /// Physical qubit count.
    pub num_qubits_on_device: u32,
    /// Undirected edge list.
    pub coupling_map: Vec<[u32; 2]>,
    /// Core structure of a modular device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular: Option<ModularInfo>,
}

impl DeviceInfo {
    /// Source tag of logical circuits.
    pub const LOGICAL_SOURCE: &'static str = "logical_circuit";

    /// Placeholder device for a logical circuit: no edges, as many qubits as
    /// the circuit.
    pub fn logical(num_qubits: u32) -> Self {
        Self {
            source: Self::LOGICAL_SOURCE.to_string(),
            topology_type: "logical".to_string(),
            num_qubits_on_device: num_qubits,
            coupling_map: vec![],
            modular: None,
        }
    }

    /// Describe a coupling graph.
    pub fn from_graph(graph: &CouplingGraph, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            topology_type: graph.topology().to_string(),
            num_qubits_on_device: graph.num_qubits(),
            coupling_map: graph.edge_list(),
            modular: graph.modular().cloned(),
        }
    }
}

/// Gate and depth counts shown next to a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Operations in the circuit as supplied.
    pub original_gates: usize,
    /// Operations after compilation (compiled circuits only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpiled_gates: Option<usize>,
    /// Slice count.
    pub depth: usize,
    /// Circuit width.
    pub qubits: u32,
    /// SWAP count (compiled circuits only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_count: Option<usize>,
}

/// One circuit in a [`Session`](crate::Session), scheduled and classified.
///
/// Records are built by the session and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitRecord {
    pub(crate) kind: CircuitKind,
    pub(crate) label: String,
    pub(crate) num_qubits: u32,
    pub(crate) schedule: Schedule,
    pub(crate) routing: Option<RoutingSummary>,
    pub(crate) device: DeviceInfo,
    pub(crate) stats: CircuitStats,
    pub(crate) settings: Option<SettingsOverrides>,
    pub(crate) algorithm_params: Map<String, Value>,
}

impl CircuitRecord {
    pub fn kind(&self) -> CircuitKind {
        self.kind
    }

    /// Display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Time-sliced operations.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Routing operations; `None` for logical circuits.
    pub fn routing(&self) -> Option<&RoutingSummary> {
        self.routing.as_ref()
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    pub fn stats(&self) -> &CircuitStats {
        &self.stats
    }

    /// Per-circuit overrides, if any were given.
    pub fn settings(&self) -> Option<&SettingsOverrides> {
        self.settings.as_ref()
    }

    /// Free-form parameters attached by the caller.
    pub fn algorithm_params(&self) -> &Map<String, Value> {
        &self.algorithm_params
    }
}
