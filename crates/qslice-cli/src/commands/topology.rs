//! Topology command implementation.

use anyhow::{Context, Result};
use console::style;

use qslice_topo::{CouplingGraph, TopologyKind, generate, heavy_hex, heavy_square};

use super::common::emit_coupling_map;

/// Execute the topology command.
pub fn execute(
    kind: &str,
    qubits: Option<u32>,
    distance: Option<u32>,
    output: Option<&str>,
) -> Result<()> {
    let kind: TopologyKind = kind
        .parse()
        .with_context(|| format!("Unknown topology kind: '{kind}'"))?;
    let graph = build(kind, qubits, distance)?;

    eprintln!(
        "{} Generated {} topology: {} qubits, {} edges",
        style("✓").green().bold(),
        style(kind).yellow(),
        graph.num_qubits(),
        graph.num_edges()
    );

    emit_coupling_map(&graph, output)
}

/// Build a canonical graph from either a qubit budget or a lattice distance.
pub fn build(kind: TopologyKind, qubits: Option<u32>, distance: Option<u32>) -> Result<CouplingGraph> {
    let graph = match (distance, qubits) {
        (Some(d), _) => match kind {
            TopologyKind::HeavyHex => heavy_hex(d)?,
            TopologyKind::HeavySquare => heavy_square(d)?,
            other => anyhow::bail!("--distance only applies to heavy_hex and heavy_square, not {other}"),
        },
        (None, Some(n)) => generate(kind, n)?,
        (None, None) => anyhow::bail!("Either --qubits or --distance is required"),
    };
    Ok(graph)
}
