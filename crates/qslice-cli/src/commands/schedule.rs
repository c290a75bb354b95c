//! Schedule command implementation.

use anyhow::{Context, Result};
use console::style;

use qslice_ir::CircuitSource;
use qslice_sched::schedule;

use super::common::{load_circuit, write_or_print};

/// Execute the schedule command.
pub fn execute(input: &str, output: Option<&str>, json: bool) -> Result<()> {
    let circuit = load_circuit(input)?;
    let schedule = schedule(&circuit)?;

    if json || output.is_some() {
        let content =
            serde_json::to_string_pretty(&schedule).context("Failed to serialize schedule")?;
        return write_or_print(&content, output);
    }

    println!(
        "{} {}: {} qubits, {} ops, depth {}",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.num_ops(),
        schedule.depth()
    );
    let width = schedule.depth().saturating_sub(1).to_string().len();
    for (i, slice) in schedule.slices().iter().enumerate() {
        let ops: Vec<String> = slice.iter().map(ToString::to_string).collect();
        println!("  {:>width$}  {}", style(i).dim(), ops.join(" "));
    }
    Ok(())
}
