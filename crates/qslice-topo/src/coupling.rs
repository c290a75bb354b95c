//! Coupling graphs: which pairs of physical qubits can interact directly.

use petgraph::graph::UnGraph;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TopologyError, TopologyResult};

/// Layout family a coupling graph was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    /// Path `0-1-2-...`.
    Line,
    /// Cycle.
    Ring,
    /// Square nearest-neighbour grid.
    Grid,
    /// IBM heavy-hexagonal lattice.
    #[serde(alias = "heavy-hex")]
    HeavyHex,
    /// Heavy-square lattice.
    #[serde(alias = "heavy-square")]
    HeavySquare,
    /// Honeycomb lattice.
    Hexagonal,
    /// Complete graph.
    Full,
    /// Anything else, including modular layouts and user-supplied maps.
    Custom,
}

impl TopologyKind {
    /// All kinds, in declaration order.
    pub const ALL: [TopologyKind; 8] = [
        TopologyKind::Line,
        TopologyKind::Ring,
        TopologyKind::Grid,
        TopologyKind::HeavyHex,
        TopologyKind::HeavySquare,
        TopologyKind::Hexagonal,
        TopologyKind::Full,
        TopologyKind::Custom,
    ];

    /// Canonical tag used in files and bundles.
    pub fn as_str(self) -> &'static str {
        match self {
            TopologyKind::Line => "line",
            TopologyKind::Ring => "ring",
            TopologyKind::Grid => "grid",
            TopologyKind::HeavyHex => "heavy_hex",
            TopologyKind::HeavySquare => "heavy_square",
            TopologyKind::Hexagonal => "hexagonal",
            TopologyKind::Full => "full",
            TopologyKind::Custom => "custom",
        }
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopologyKind {
    type Err = TopologyError;

    fn from_str(s: &str) -> TopologyResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TopologyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| TopologyError::InvalidParameter(format!("unknown topology '{s}'")))
    }
}

/// How cores are arranged relative to each other in a modular layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreArrangement {
    /// Core `i` links to core `i + 1`, wrapping around.
    #[serde(alias = "Ring")]
    Ring,
    /// Cores laid out row-major on a square-ish grid.
    #[serde(alias = "Grid")]
    Grid,
}

impl fmt::Display for CoreArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreArrangement::Ring => f.write_str("ring"),
            CoreArrangement::Grid => f.write_str("grid"),
        }
    }
}

impl FromStr for CoreArrangement {
    type Err = TopologyError;

    fn from_str(s: &str) -> TopologyResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ring" => Ok(CoreArrangement::Ring),
            "grid" => Ok(CoreArrangement::Grid),
            other => Err(TopologyError::InvalidParameter(format!(
                "unknown core arrangement '{other}' (expected ring or grid)"
            ))),
        }
    }
}

/// Modular structure attached to a composite coupling graph.
///
/// `inter_core_links` is a distinguished subset of the graph's edges:
/// consumers draw and analyze them separately from intra-core couplings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModularInfo {
    /// Number of cores.
    pub num_cores: u32,
    /// Qubits in each core; core `c` owns `c * qubits_per_core ..`.
    pub qubits_per_core: u32,
    /// Arrangement of the cores themselves.
    pub global_topology: CoreArrangement,
    /// Edges that cross core boundaries.
    pub inter_core_links: Vec<(u32, u32)>,
}

impl ModularInfo {
    /// Core that owns `qubit`, if the qubit falls inside the core range.
    pub fn core_of(&self, qubit: u32) -> Option<u32> {
        if self.qubits_per_core == 0 {
            return None;
        }
        let core = qubit / self.qubits_per_core;
        (core < self.num_cores).then_some(core)
    }

    /// Whether `(a, b)` is one of the inter-core links, in either direction.
    pub fn is_inter_core(&self, a: u32, b: u32) -> bool {
        let key = normalize(a, b);
        self.inter_core_links
            .iter()
            .any(|&(x, y)| normalize(x, y) == key)
    }
}

/// Undirected connectivity graph of a device.
///
/// Edges are stored once as `(min, max)` pairs in insertion order; duplicate
/// and reversed pairs are ignored. An adjacency index is rebuilt on
/// deserialization so lookups never need a separate cache refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CouplingGraphRepr")]
pub struct CouplingGraph {
    num_qubits: u32,
    edges: Vec<(u32, u32)>,
    topology: TopologyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    modular: Option<ModularInfo>,
    /// Adjacency list indexed by qubit.
    #[serde(skip)]
    adjacency: Vec<Vec<u32>>,
    #[serde(skip)]
    edge_set: FxHashSet<(u32, u32)>,
}

#[derive(Deserialize)]
struct CouplingGraphRepr {
    num_qubits: u32,
    edges: Vec<(u32, u32)>,
    topology: TopologyKind,
    #[serde(default)]
    modular: Option<ModularInfo>,
}

impl TryFrom<CouplingGraphRepr> for CouplingGraph {
    type Error = TopologyError;

    fn try_from(repr: CouplingGraphRepr) -> TopologyResult<Self> {
        let mut graph = CouplingGraph::new(repr.num_qubits, repr.topology);
        for (a, b) in repr.edges {
            graph.add_edge(a, b)?;
        }
        if let Some(modular) = repr.modular {
            graph = graph.with_modular(modular)?;
        }
        Ok(graph)
    }
}

impl PartialEq for CouplingGraph {
    fn eq(&self, other: &Self) -> bool {
        self.num_qubits == other.num_qubits
            && self.topology == other.topology
            && self.modular == other.modular
            && self.edge_set == other.edge_set
    }
}

impl Eq for CouplingGraph {}

#[inline]
fn normalize(a: u32, b: u32) -> (u32, u32) {
    if a <= b { (a, b) } else { (b, a) }
}

impl CouplingGraph {
    /// Create an edgeless graph over `num_qubits` qubits.
    pub fn new(num_qubits: u32, topology: TopologyKind) -> Self {
        Self {
            num_qubits,
            edges: vec![],
            topology,
            modular: None,
            adjacency: vec![Vec::new(); num_qubits as usize],
            edge_set: FxHashSet::default(),
        }
    }

    /// Build a graph from an edge list, rejecting out-of-range endpoints and
    /// self-loops.
    pub fn from_edges(
        num_qubits: u32,
        topology: TopologyKind,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> TopologyResult<Self> {
        let mut graph = Self::new(num_qubits, topology);
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Add an undirected edge. Returns `Ok(false)` if it was already present.
    pub fn add_edge(&mut self, a: u32, b: u32) -> TopologyResult<bool> {
        if a == b || a >= self.num_qubits || b >= self.num_qubits {
            return Err(TopologyError::InvalidEdge {
                a,
                b,
                num_qubits: self.num_qubits,
            });
        }
        Ok(self.insert_edge(a, b))
    }

    /// Generator-side insertion; endpoints are known to be valid.
    pub(crate) fn insert_edge(&mut self, a: u32, b: u32) -> bool {
        debug_assert!(a != b && a < self.num_qubits && b < self.num_qubits);
        let key = normalize(a, b);
        if !self.edge_set.insert(key) {
            return false;
        }
        self.edges.push(key);
        self.adjacency[a as usize].push(b);
        self.adjacency[b as usize].push(a);
        true
    }

    /// Attach modular structure. Every inter-core link must be a valid edge;
    /// links missing from the edge set are added.
    pub fn with_modular(mut self, modular: ModularInfo) -> TopologyResult<Self> {
        for &(a, b) in &modular.inter_core_links {
            self.add_edge(a, b)?;
        }
        self.modular = Some(modular);
        Ok(self)
    }

    /// Number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edges as normalized `(min, max)` pairs, in insertion order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Edges as two-element lists, the shape used in files and bundles.
    pub fn edge_list(&self) -> Vec<[u32; 2]> {
        self.edges.iter().map(|&(a, b)| [a, b]).collect()
    }

    /// Layout family tag.
    pub fn topology(&self) -> TopologyKind {
        self.topology
    }

    /// Modular structure, if this is a composite layout.
    pub fn modular(&self) -> Option<&ModularInfo> {
        self.modular.as_ref()
    }

    /// Whether this graph came from a composite generator or file.
    pub fn is_modular(&self) -> bool {
        self.modular.is_some()
    }

    /// Check if two qubits are directly connected.
    #[inline]
    pub fn is_connected(&self, a: u32, b: u32) -> bool {
        self.edge_set.contains(&normalize(a, b))
    }

    /// Get neighbors of a qubit.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(qubit as usize)
            .into_iter()
            .flatten()
            .copied()
    }

    /// Number of couplings on `qubit`.
    pub fn degree(&self, qubit: u32) -> usize {
        self.adjacency.get(qubit as usize).map_or(0, Vec::len)
    }

    /// Largest degree in the graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Edges that stay within one core. For flat graphs this is every edge.
    pub fn intra_core_edges(&self) -> Vec<(u32, u32)> {
        match &self.modular {
            Some(info) => self
                .edges
                .iter()
                .copied()
                .filter(|&(a, b)| !info.is_inter_core(a, b))
                .collect(),
            None => self.edges.clone(),
        }
    }

    /// Convert to a petgraph undirected graph; node weights are qubit ids.
    pub fn to_graph(&self) -> UnGraph<u32, ()> {
        let mut graph = UnGraph::with_capacity(self.num_qubits as usize, self.edges.len());
        for q in 0..self.num_qubits {
            graph.add_node(q);
        }
        graph.extend_with_edges(self.edges.iter().map(|&(a, b)| (a, b)));
        graph
    }

    /// Whether every qubit can reach every other qubit.
    pub fn is_connected_graph(&self) -> bool {
        self.num_qubits <= 1 || petgraph::algo::connected_components(&self.to_graph()) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_normalized_and_deduplicated() {
        let mut graph = CouplingGraph::new(3, TopologyKind::Custom);
        assert!(graph.add_edge(1, 0).unwrap());
        assert!(!graph.add_edge(0, 1).unwrap());
        assert!(graph.add_edge(2, 1).unwrap());

        assert_eq!(graph.edges(), &[(0, 1), (1, 2)]);
        assert!(graph.is_connected(1, 0));
        assert!(!graph.is_connected(0, 2));
        assert_eq!(graph.degree(1), 2);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let mut graph = CouplingGraph::new(2, TopologyKind::Custom);
        assert!(matches!(
            graph.add_edge(0, 2),
            Err(TopologyError::InvalidEdge { b: 2, .. })
        ));
        assert!(graph.add_edge(1, 1).is_err());
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_connectivity_via_petgraph() {
        let split = CouplingGraph::from_edges(4, TopologyKind::Custom, [(0, 1), (2, 3)]).unwrap();
        assert!(!split.is_connected_graph());

        let joined =
            CouplingGraph::from_edges(4, TopologyKind::Custom, [(0, 1), (1, 2), (2, 3)]).unwrap();
        assert!(joined.is_connected_graph());
        assert_eq!(joined.to_graph().edge_count(), 3);
    }

    #[test]
    fn test_topology_kind_parsing() {
        assert_eq!("heavy-hex".parse::<TopologyKind>().unwrap(), TopologyKind::HeavyHex);
        assert_eq!("Heavy_Square".parse::<TopologyKind>().unwrap(), TopologyKind::HeavySquare);
        assert_eq!("RING".parse::<TopologyKind>().unwrap(), TopologyKind::Ring);
        assert!("torus".parse::<TopologyKind>().is_err());
        assert_eq!(TopologyKind::HeavyHex.to_string(), "heavy_hex");
    }

    #[test]
    fn test_serde_rebuilds_adjacency() {
        let graph = CouplingGraph::from_edges(3, TopologyKind::Line, [(0, 1), (1, 2)]).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        let back: CouplingGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(back, graph);
        assert_eq!(back.neighbors(1).count(), 2);
        assert!(back.is_connected(2, 1));
    }

    #[test]
    fn test_modular_info_lookup() {
        let info = ModularInfo {
            num_cores: 2,
            qubits_per_core: 3,
            global_topology: CoreArrangement::Ring,
            inter_core_links: vec![(2, 3)],
        };
        assert_eq!(info.core_of(4), Some(1));
        assert_eq!(info.core_of(6), None);
        assert!(info.is_inter_core(3, 2));
        assert!(!info.is_inter_core(0, 1));
    }
}
