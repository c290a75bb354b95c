//! Composite layouts: several qubit cores joined by sparse inter-core links.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::canonical::ceil_sqrt;
use crate::coupling::{CoreArrangement, CouplingGraph, ModularInfo, TopologyKind};
use crate::error::{TopologyError, TopologyResult};

/// Connectivity inside a single core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreTopology {
    /// Every pair of qubits in the core is coupled.
    AllToAll,
    /// The core's qubits form a cycle.
    Ring,
    /// The core's qubits fill a square grid row by row.
    Grid,
}

impl fmt::Display for CoreTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreTopology::AllToAll => f.write_str("all_to_all"),
            CoreTopology::Ring => f.write_str("ring"),
            CoreTopology::Grid => f.write_str("grid"),
        }
    }
}

impl FromStr for CoreTopology {
    type Err = TopologyError;

    fn from_str(s: &str) -> TopologyResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_to_all" | "full" => Ok(CoreTopology::AllToAll),
            "ring" => Ok(CoreTopology::Ring),
            "grid" => Ok(CoreTopology::Grid),
            other => Err(TopologyError::InvalidParameter(format!(
                "unknown core topology '{other}' (expected all_to_all, ring or grid)"
            ))),
        }
    }
}

/// Parameters of a modular device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModularSpec {
    /// Number of cores.
    pub num_cores: u32,
    /// Qubits per core.
    pub qubits_per_core: u32,
    /// Connectivity inside each core.
    pub intra_core: CoreTopology,
    /// How cores are linked to each other.
    pub global_topology: CoreArrangement,
}

impl ModularSpec {
    /// Describe a modular device.
    pub fn new(
        num_cores: u32,
        qubits_per_core: u32,
        intra_core: CoreTopology,
        global_topology: CoreArrangement,
    ) -> Self {
        Self {
            num_cores,
            qubits_per_core,
            intra_core,
            global_topology,
        }
    }

    /// Total qubit count, `None` when it does not fit in a `u32`.
    pub fn num_qubits(&self) -> Option<u32> {
        self.num_cores.checked_mul(self.qubits_per_core)
    }

    fn first_qubit(&self, core: u32) -> u32 {
        core * self.qubits_per_core
    }

    fn last_qubit(&self, core: u32) -> u32 {
        core * self.qubits_per_core + self.qubits_per_core - 1
    }

    /// Pairs of adjacent cores, in link order.
    fn core_pairs(&self) -> Vec<(u32, u32)> {
        let n = self.num_cores;
        match self.global_topology {
            CoreArrangement::Ring => match n {
                0 | 1 => vec![],
                2 => vec![(0, 1)],
                _ => (0..n).map(|c| (c, (c + 1) % n)).collect(),
            },
            CoreArrangement::Grid => {
                let width = ceil_sqrt(n);
                let mut pairs = Vec::new();
                for c in 0..n {
                    if c % width + 1 < width && c + 1 < n {
                        pairs.push((c, c + 1));
                    }
                    if n - c > width {
                        pairs.push((c, c + width));
                    }
                }
                pairs
            }
        }
    }

    /// Build the coupling graph.
    ///
    /// Inter-core links join the last qubit of one core to the first qubit
    /// of the neighbouring core and are recorded in [`ModularInfo`].
    pub fn build(&self) -> TopologyResult<CouplingGraph> {
        for (what, size) in [
            ("num_cores", self.num_cores),
            ("qubits_per_core", self.qubits_per_core),
        ] {
            if size == 0 {
                return Err(TopologyError::InvalidSize {
                    topology: format!("modular {what}"),
                    size,
                });
            }
        }

        let total = self.num_qubits().ok_or_else(|| {
            TopologyError::InvalidParameter(format!(
                "{} cores of {} qubits need more than {} qubits",
                self.num_cores,
                self.qubits_per_core,
                u32::MAX
            ))
        })?;
        let mut graph = CouplingGraph::new(total, TopologyKind::Custom);
        for core in 0..self.num_cores {
            let offset = self.first_qubit(core);
            for (a, b) in intra_core_edges(self.intra_core, self.qubits_per_core) {
                graph.insert_edge(offset + a, offset + b);
            }
        }

        let inter_core_links: Vec<(u32, u32)> = self
            .core_pairs()
            .into_iter()
            .map(|(from, to)| (self.last_qubit(from), self.first_qubit(to)))
            .collect();

        debug!(
            cores = self.num_cores,
            qubits_per_core = self.qubits_per_core,
            intra = %self.intra_core,
            global = %self.global_topology,
            links = inter_core_links.len(),
            "generated modular coupling graph"
        );

        graph.with_modular(ModularInfo {
            num_cores: self.num_cores,
            qubits_per_core: self.qubits_per_core,
            global_topology: self.global_topology,
            inter_core_links,
        })
    }
}

/// Local edges of one core over qubits `0..size`.
fn intra_core_edges(topology: CoreTopology, size: u32) -> Vec<(u32, u32)> {
    let mut edges = Vec::new();
    match topology {
        CoreTopology::AllToAll => {
            for i in 0..size {
                for j in (i + 1)..size {
                    edges.push((i, j));
                }
            }
        }
        CoreTopology::Ring => match size {
            0 | 1 => {}
            2 => edges.push((0, 1)),
            _ => edges.extend((0..size).map(|i| (i, (i + 1) % size))),
        },
        CoreTopology::Grid => {
            let side = ceil_sqrt(size);
            for q in 0..size {
                if q % side + 1 < side && q + 1 < size {
                    edges.push((q, q + 1));
                }
                if size - q > side {
                    edges.push((q, q + side));
                }
            }
        }
    }
    edges
}
