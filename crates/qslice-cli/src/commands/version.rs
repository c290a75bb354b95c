//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - time-sliced quantum circuit visualization data",
        style("qslice").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qslice-ir     Circuit data model");
    println!("  qslice-topo   Hardware coupling graphs");
    println!("  qslice-sched  Slice scheduling and routing analysis");
    println!("  qslice-viz    Settings, sessions and bundle export");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
