//! Bundle export: the JSON document a visualizer front end consumes.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use qslice_sched::{RoutingSummary, Schedule};

use crate::error::VizResult;
use crate::record::{CircuitRecord, CircuitStats, DeviceInfo};
use crate::settings::VisualizerSettings;

/// Export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Slices of one circuit.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitInfo<'a> {
    pub num_qubits: u32,
    pub slices: &'a Schedule,
}

/// One circuit in a bundle.
#[derive(Debug, Clone, Serialize)]
pub struct BundleEntry<'a> {
    pub circuit_info: CircuitInfo<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_info: Option<&'a RoutingSummary>,
    pub device_info: &'a DeviceInfo,
    pub algorithm_name: &'a str,
    pub circuit_type: &'static str,
    pub circuit_stats: &'a CircuitStats,
    pub algorithm_params: &'a Map<String, Value>,
    /// Session defaults merged with the record's overrides.
    pub settings: VisualizerSettings,
}

impl<'a> BundleEntry<'a> {
    pub(crate) fn new(record: &'a CircuitRecord, defaults: &VisualizerSettings) -> VizResult<Self> {
        Ok(Self {
            circuit_info: CircuitInfo {
                num_qubits: record.num_qubits(),
                slices: record.schedule(),
            },
            routing_info: record.routing(),
            device_info: record.device(),
            algorithm_name: record.label(),
            circuit_type: record.kind().as_str(),
            circuit_stats: record.stats(),
            algorithm_params: record.algorithm_params(),
            settings: defaults.resolve(record.settings())?,
        })
    }
}

/// Every circuit of a session, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle<'a> {
    pub circuits: Vec<BundleEntry<'a>>,
    pub total_circuits: usize,
    /// Session-wide defaults.
    pub settings: &'a VisualizerSettings,
}

impl Bundle<'_> {
    /// Serialize to a JSON string.
    pub fn to_json(&self, config: &ExportConfig) -> VizResult<String> {
        let json = if config.pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Serialize to a `serde_json::Value`.
    pub fn to_value(&self) -> VizResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Write the bundle to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>, config: &ExportConfig) -> VizResult<()> {
        std::fs::write(path, self.to_json(config)?)?;
        Ok(())
    }
}
