//! Bundle command implementation.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use tracing::debug;

use qslice_viz::{CircuitOptions, ExportConfig, Session, VisualizerSettings};

use super::common::{load_circuit, load_coupling_map, split_circuit_arg, write_or_print};

/// Execute the bundle command.
///
/// Each `circuits` entry is `circuit.json` (logical) or
/// `circuit.json:coupling_map.json` (compiled onto that device).
pub fn execute(
    circuits: &[String],
    settings: Option<&str>,
    output: Option<&str>,
    compact: bool,
) -> Result<()> {
    let defaults = match settings {
        Some(path) => VisualizerSettings::from_path(path)
            .with_context(|| format!("Failed to load settings: {path}"))?,
        None => VisualizerSettings::default(),
    };
    let mut session = Session::with_settings(defaults)?;

    for arg in circuits {
        let (circuit_path, map_path) = split_circuit_arg(arg);
        debug!(circuit = circuit_path, coupling_map = ?map_path, "loading circuit");
        let circuit = load_circuit(circuit_path)?;
        let device = map_path.map(load_coupling_map).transpose()?;

        let label = if circuit.name().is_empty() {
            Path::new(circuit_path)
                .file_stem()
                .map_or_else(|| circuit_path.to_string(), |s| s.to_string_lossy().into_owned())
        } else {
            circuit.name().to_string()
        };
        let mut options = CircuitOptions::new().label(label);
        if let (Some(graph), Some(path)) = (device.as_ref(), map_path) {
            options = options.device(graph).device_source(path);
        }

        let record = session
            .add_circuit_with(&circuit, options)
            .with_context(|| format!("Failed to add circuit: {circuit_path}"))?;
        eprintln!(
            "{} Added {} circuit '{}' (depth {})",
            style("+").green().bold(),
            record.kind(),
            record.label(),
            record.stats().depth
        );
    }

    let bundle = session.export()?;
    let json = bundle
        .to_json(&ExportConfig { pretty: !compact })
        .context("Failed to serialize bundle")?;
    write_or_print(&json, output)
}
