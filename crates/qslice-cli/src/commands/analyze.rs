//! Analyze command implementation.

use anyhow::{Context, Result};
use console::style;

use qslice_sched::{RoutingClassifier, analyze_overhead};

use super::common::load_circuit;

/// Execute the analyze command.
pub fn execute(logical: &str, compiled: &str, routing_names: &[String], json: bool) -> Result<()> {
    let logical_circuit = load_circuit(logical)?;
    let compiled_circuit = load_circuit(compiled)?;

    let classifier = routing_names
        .iter()
        .fold(RoutingClassifier::default(), |c, name| c.with_name(name));
    let report = analyze_overhead(&logical_circuit, &compiled_circuit, &classifier)?;

    if json {
        let content =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{content}");
        return Ok(());
    }

    println!(
        "{} Routing overhead of {} over {}",
        style("→").cyan().bold(),
        style(compiled).green(),
        style(logical).green()
    );
    for line in report.to_string().lines() {
        println!("  {line}");
    }
    if !report.has_routing() {
        println!("  {}", style("no routing operations").dim());
    }
    Ok(())
}
