//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qslice_ir::Circuit;
use qslice_topo::{CouplingGraph, CouplingMapFile};

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    Circuit::from_path(path).with_context(|| format!("Failed to load circuit: {path}"))
}

/// Load a coupling-map file and build its graph.
pub fn load_coupling_map(path: &str) -> Result<CouplingGraph> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    CouplingMapFile::from_path(path)
        .and_then(|file| file.to_graph())
        .with_context(|| format!("Failed to load coupling map: {path}"))
}

/// Write `content` to `output`, or print it when no output is given.
pub fn write_or_print(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
            println!("  Output: {}", style(path).green());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Write a coupling graph as a coupling-map file (or print it).
pub fn emit_coupling_map(graph: &CouplingGraph, output: Option<&str>) -> Result<()> {
    let json = CouplingMapFile::from(graph)
        .to_json_pretty()
        .context("Failed to serialize coupling map")?;
    write_or_print(&json, output)
}

/// Whether the colon at byte `i` belongs to a drive prefix such as `C:\`.
fn is_drive_colon(arg: &str, i: usize) -> bool {
    let bytes = arg.as_bytes();
    let letter_starts_path = i == 1 || (i >= 2 && bytes[i - 2] == b':');
    i >= 1
        && letter_starts_path
        && bytes[i - 1].is_ascii_alphabetic()
        && matches!(bytes.get(i + 1), Some(b'\\' | b'/'))
}

/// Split a `circuit.json[:coupling_map.json]` argument.
///
/// Drive prefixes (`C:\`, `D:/`) on either path are not separators.
pub fn split_circuit_arg(arg: &str) -> (&str, Option<&str>) {
    let separator = arg
        .match_indices(':')
        .map(|(i, _)| i)
        .find(|&i| !is_drive_colon(arg, i));
    match separator {
        Some(i) if i + 1 < arg.len() => (&arg[..i], Some(&arg[i + 1..])),
        Some(i) => (&arg[..i], None),
        None => (arg, None),
    }
}
