//! qslice Command-Line Interface
//!
//! Generates coupling maps, slices circuits into time steps, measures
//! routing overhead and assembles visualization bundles.
//!
//! ```text
//! qslice topology --kind heavy_hex --distance 3 -o hh3.json
//! qslice schedule -i ghz.json
//! qslice analyze --logical ghz.json --compiled ghz_routed.json
//! qslice bundle --circuit ghz.json --circuit ghz_routed.json:hh3.json -o bundle.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{analyze, bundle, modular, schedule, topology, version};

/// qslice - time-sliced interaction data for quantum circuit visualization
#[derive(Parser)]
#[command(name = "qslice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a canonical coupling map
    Topology {
        /// Topology kind (line, ring, grid, heavy_hex, heavy_square, hexagonal, full)
        #[arg(short, long)]
        kind: String,

        /// Qubit budget
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Lattice distance (heavy_hex and heavy_square only; odd)
        #[arg(short, long)]
        distance: Option<u32>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate a modular coupling map: cores joined by inter-core links
    Modular {
        /// Number of cores
        #[arg(long)]
        cores: u32,

        /// Qubits in each core
        #[arg(long)]
        qubits_per_core: u32,

        /// Connectivity inside a core (all_to_all, ring, grid)
        #[arg(long, default_value = "all_to_all")]
        intra: String,

        /// Arrangement of cores (ring, grid)
        #[arg(long, default_value = "ring")]
        global: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Slice a circuit into time steps
    Schedule {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: String,

        /// Output file for the slices as JSON
        #[arg(short, long)]
        output: Option<String>,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Compare a logical circuit with its compiled form
    Analyze {
        /// Logical circuit (JSON)
        #[arg(long)]
        logical: String,

        /// Compiled circuit (JSON)
        #[arg(long)]
        compiled: String,

        /// Extra gate names to treat as routing operations
        #[arg(long = "routing-name")]
        routing_names: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a visualization bundle from several circuits
    Bundle {
        /// Circuit file, optionally with a coupling map: circuit.json[:map.json]
        #[arg(short, long = "circuit", required = true)]
        circuits: Vec<String>,

        /// Settings file (YAML or JSON) overriding the defaults
        #[arg(short, long, env = "QSLICE_SETTINGS")]
        settings: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Topology {
            kind,
            qubits,
            distance,
            output,
        } => topology::execute(&kind, qubits, distance, output.as_deref()),

        Commands::Modular {
            cores,
            qubits_per_core,
            intra,
            global,
            output,
        } => modular::execute(cores, qubits_per_core, &intra, &global, output.as_deref()),

        Commands::Schedule {
            input,
            output,
            json,
        } => schedule::execute(&input, output.as_deref(), json),

        Commands::Analyze {
            logical,
            compiled,
            routing_names,
            json,
        } => analyze::execute(&logical, &compiled, &routing_names, json),

        Commands::Bundle {
            circuits,
            settings,
            output,
            compact,
        } => bundle::execute(&circuits, settings.as_deref(), output.as_deref(), compact),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
