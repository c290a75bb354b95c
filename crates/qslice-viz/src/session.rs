//! Collecting circuits for one visualization.

use serde_json::{Map, Value};
use tracing::{info, warn};

use qslice_ir::CircuitSource;
use qslice_sched::{RoutingClassifier, RoutingSummary, schedule};
use qslice_topo::CouplingGraph;

use crate::error::{VizError, VizResult};
use crate::export::{Bundle, BundleEntry};
use crate::record::{CircuitKind, CircuitRecord, CircuitStats, DeviceInfo};
use crate::settings::{SettingsOverrides, VisualizerSettings};

/// Optional inputs for [`Session::add_circuit_with`].
#[derive(Debug, Clone, Default)]
pub struct CircuitOptions<'a> {
    /// Target device; its presence marks the circuit as compiled.
    pub device: Option<&'a CouplingGraph>,
    /// Where the device came from, e.g. a coupling-map file path.
    pub device_source: Option<String>,
    /// Display name; generated when absent.
    pub label: Option<String>,
    /// Per-circuit settings.
    pub settings: Option<SettingsOverrides>,
    /// Operation count before compilation, when it differs from the
    /// supplied circuit.
    pub original_gates: Option<usize>,
    /// Free-form parameters carried into the bundle.
    pub algorithm_params: Map<String, Value>,
}

impl<'a> CircuitOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, device: &'a CouplingGraph) -> Self {
        self.device = Some(device);
        self
    }

    pub fn device_source(mut self, source: impl Into<String>) -> Self {
        self.device_source = Some(source.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn settings(mut self, settings: SettingsOverrides) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn original_gates(mut self, count: usize) -> Self {
        self.original_gates = Some(count);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.algorithm_params.insert(key.into(), value.into());
        self
    }
}

/// An ordered collection of circuit records plus the session defaults.
///
/// The session is an ordinary value owned by the caller: several can coexist,
/// and records can only be appended or cleared wholesale.
///
/// ```rust
/// use qslice_ir::{Circuit, QubitId};
/// use qslice_topo::line;
/// use qslice_viz::Session;
///
/// let mut logical = Circuit::new("bell", 2);
/// logical.h(QubitId(0)).unwrap();
/// logical.cx(QubitId(0), QubitId(1)).unwrap();
///
/// let device = line(2).unwrap();
/// let mut session = Session::new();
/// session.add_circuit(&logical, None, None, None).unwrap();
/// session.add_circuit(&logical, Some(&device), Some("on line"), None).unwrap();
///
/// let bundle = session.export().unwrap();
/// assert_eq!(bundle.total_circuits, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    defaults: VisualizerSettings,
    classifier: RoutingClassifier,
    records: Vec<CircuitRecord>,
}

impl Session {
    /// Empty session with default settings and routing names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session with the given defaults.
    pub fn with_settings(defaults: VisualizerSettings) -> VizResult<Self> {
        defaults.validate()?;
        Ok(Self {
            defaults,
            ..Self::default()
        })
    }

    /// Replace the routing classifier used for compiled circuits.
    #[must_use]
    pub fn with_classifier(mut self, classifier: RoutingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Session-wide default settings.
    pub fn settings(&self) -> &VisualizerSettings {
        &self.defaults
    }

    pub fn classifier(&self) -> &RoutingClassifier {
        &self.classifier
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[CircuitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record; settings are kept.
    pub fn clear(&mut self) {
        self.records.clear();
        info!("cleared all circuits");
    }

    /// Schedule a circuit and append its record.
    ///
    /// Without a device the circuit is logical; with one it is compiled and
    /// its routing operations are extracted. On error nothing is appended.
    pub fn add_circuit<C: CircuitSource + ?Sized>(
        &mut self,
        circuit: &C,
        device: Option<&CouplingGraph>,
        label: Option<&str>,
        settings: Option<SettingsOverrides>,
    ) -> VizResult<&CircuitRecord> {
        let options = CircuitOptions {
            device,
            label: label.map(str::to_string),
            settings,
            ..CircuitOptions::default()
        };
        self.add_circuit_with(circuit, options)
    }

    /// [`add_circuit`](Self::add_circuit) with every optional input.
    pub fn add_circuit_with<C: CircuitSource + ?Sized>(
        &mut self,
        circuit: &C,
        options: CircuitOptions<'_>,
    ) -> VizResult<&CircuitRecord> {
        let record = self.build_record(circuit, options)?;
        info!(
            kind = %record.kind,
            label = %record.label,
            qubits = record.num_qubits,
            depth = record.stats.depth,
            "added circuit"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    fn build_record<C: CircuitSource + ?Sized>(
        &self,
        circuit: &C,
        options: CircuitOptions<'_>,
    ) -> VizResult<CircuitRecord> {
        // Resolve now so bad overrides fail at insertion, not at export.
        self.defaults.resolve(options.settings.as_ref())?;

        let kind = match options.device {
            Some(_) => CircuitKind::Compiled,
            None => CircuitKind::Logical,
        };
        let label = options.label.unwrap_or_else(|| {
            let prefix = match kind {
                CircuitKind::Logical => "Logical",
                CircuitKind::Compiled => "Compiled",
            };
            format!("{prefix} Circuit {}", self.records.len() + 1)
        });

        let num_qubits = circuit.num_qubits();
        let schedule = schedule(circuit)?;
        let num_ops = circuit.num_ops();

        let (routing, device, stats) = match options.device {
            None => (
                None,
                DeviceInfo::logical(num_qubits),
                CircuitStats {
                    original_gates: options.original_gates.unwrap_or(num_ops),
                    transpiled_gates: None,
                    depth: schedule.depth(),
                    qubits: num_qubits,
                    swap_count: None,
                },
            ),
            Some(graph) => {
                if num_qubits > graph.num_qubits() {
                    warn!(
                        label = %label,
                        circuit_qubits = num_qubits,
                        device_qubits = graph.num_qubits(),
                        "compiled circuit is wider than its device"
                    );
                }
                let routing = RoutingSummary::from_schedule(num_qubits, &schedule, &self.classifier);
                let source = options
                    .device_source
                    .unwrap_or_else(|| "coupling_graph".to_string());
                let stats = CircuitStats {
                    original_gates: options.original_gates.unwrap_or(num_ops),
                    transpiled_gates: Some(num_ops),
                    depth: schedule.depth(),
                    qubits: num_qubits,
                    swap_count: Some(routing.total_swap_count),
                };
                (Some(routing), DeviceInfo::from_graph(graph, source), stats)
            }
        };

        Ok(CircuitRecord {
            kind,
            label,
            num_qubits,
            schedule,
            routing,
            device,
            stats,
            settings: options.settings,
            algorithm_params: options.algorithm_params,
        })
    }

    /// Assemble the bundle of every record.
    ///
    /// Fails with [`VizError::EmptyCollection`] when no circuit was added.
    pub fn export(&self) -> VizResult<Bundle<'_>> {
        if self.records.is_empty() {
            return Err(VizError::EmptyCollection);
        }

        let circuits = self
            .records
            .iter()
            .map(|record| BundleEntry::new(record, &self.defaults))
            .collect::<VizResult<Vec<_>>>()?;

        info!(circuits = circuits.len(), "exported visualization bundle");
        Ok(Bundle {
            total_circuits: circuits.len(),
            circuits,
            settings: &self.defaults,
        })
    }
}
