//! Modular command implementation.

use anyhow::{Context, Result};
use console::style;

use qslice_topo::{CoreArrangement, CoreTopology, ModularSpec};

use super::common::emit_coupling_map;

/// Execute the modular command.
pub fn execute(
    cores: u32,
    qubits_per_core: u32,
    intra: &str,
    global: &str,
    output: Option<&str>,
) -> Result<()> {
    let intra: CoreTopology = intra
        .parse()
        .with_context(|| format!("Invalid intra-core topology: '{intra}'"))?;
    let global: CoreArrangement = global
        .parse()
        .with_context(|| format!("Invalid core arrangement: '{global}'"))?;

    let graph = ModularSpec::new(cores, qubits_per_core, intra, global).build()?;
    let links = graph.modular().map_or(0, |m| m.inter_core_links.len());

    eprintln!(
        "{} Generated {} {} cores of {} qubits: {} edges, {} inter-core links",
        style("✓").green().bold(),
        cores,
        style(intra).yellow(),
        qubits_per_core,
        graph.num_edges(),
        links
    );

    emit_coupling_map(&graph, output)
}
