//! Coupling-map file format.
//!
//! ```json
//! {
//!   "topology_type": "ring",
//!   "num_qubits": 4,
//!   "coupling_map": [[0, 1], [1, 2], [2, 3], [3, 0]]
//! }
//! ```
//!
//! A missing `topology_type` reads as `custom`.
//!
//! Modular layouts add `num_cores`, `qubits_per_core`, `global_topology` and
//! `inter_core_links`; either all four are present or none.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::coupling::{CoreArrangement, CouplingGraph, ModularInfo, TopologyKind};
use crate::error::{TopologyError, TopologyResult};

const MODULAR_FIELDS: [&str; 4] = [
    "num_cores",
    "qubits_per_core",
    "global_topology",
    "inter_core_links",
];

/// On-disk coupling-map record.
///
/// `topology_type` is kept verbatim so tags like `modular_ring` survive a
/// round trip even though they map to [`TopologyKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingMapFile {
    /// Topology tag.
    #[serde(default = "default_topology_type")]
    pub topology_type: String,
    /// Number of physical qubits.
    pub num_qubits: u32,
    /// Edge list; directed duplicates are tolerated on input.
    pub coupling_map: Vec<[u32; 2]>,
    /// Number of cores (modular layouts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_cores: Option<u32>,
    /// Qubits per core (modular layouts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubits_per_core: Option<u32>,
    /// Core arrangement (modular layouts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_topology: Option<String>,
    /// Edges crossing cores (modular layouts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_core_links: Option<Vec<[u32; 2]>>,
}

fn default_topology_type() -> String {
    TopologyKind::Custom.to_string()
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> TopologyResult<&'a Value> {
    obj.get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| TopologyError::malformed(field, "missing required field"))
}

fn as_u32(value: &Value, field: &str) -> TopologyResult<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            TopologyError::malformed(field, format!("expected a non-negative integer, got {value}"))
        })
}

fn as_edges(value: &Value, field: &str) -> TopologyResult<Vec<[u32; 2]>> {
    let items = value
        .as_array()
        .ok_or_else(|| TopologyError::malformed(field, "expected a list of qubit pairs"))?;
    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([a, b]) => Ok([as_u32(a, field)?, as_u32(b, field)?]),
            _ => Err(TopologyError::malformed(
                field,
                format!("expected a 2-element qubit pair, got {item}"),
            )),
        })
        .collect()
}

impl CouplingMapFile {
    /// Parse and check a coupling-map record.
    ///
    /// Missing or mistyped fields are reported as
    /// [`TopologyError::MalformedCouplingMapFile`] naming the field.
    pub fn from_json_str(json: &str) -> TopologyResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Load a coupling-map record from disk.
    pub fn from_path(path: impl AsRef<Path>) -> TopologyResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Check a parsed JSON value field by field.
    pub fn from_value(value: &Value) -> TopologyResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| TopologyError::malformed("<root>", "expected a JSON object"))?;

        let topology_type = match obj.get("topology_type").filter(|v| !v.is_null()) {
            Some(tag) => tag
                .as_str()
                .ok_or_else(|| TopologyError::malformed("topology_type", "expected a string"))?
                .to_string(),
            None => default_topology_type(),
        };
        let num_qubits = as_u32(required(obj, "num_qubits")?, "num_qubits")?;
        if num_qubits == 0 {
            return Err(TopologyError::malformed("num_qubits", "must be positive"));
        }
        let coupling_map = as_edges(required(obj, "coupling_map")?, "coupling_map")?;

        let mut file = Self {
            topology_type,
            num_qubits,
            coupling_map,
            num_cores: None,
            qubits_per_core: None,
            global_topology: None,
            inter_core_links: None,
        };

        if MODULAR_FIELDS
            .iter()
            .any(|f| obj.get(*f).is_some_and(|v| !v.is_null()))
        {
            file.num_cores = Some(as_u32(required(obj, "num_cores")?, "num_cores")?);
            file.qubits_per_core =
                Some(as_u32(required(obj, "qubits_per_core")?, "qubits_per_core")?);
            file.global_topology = Some(
                required(obj, "global_topology")?
                    .as_str()
                    .ok_or_else(|| {
                        TopologyError::malformed("global_topology", "expected a string")
                    })?
                    .to_string(),
            );
            file.inter_core_links = Some(as_edges(
                required(obj, "inter_core_links")?,
                "inter_core_links",
            )?);
        }

        Ok(file)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> TopologyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the record to disk.
    pub fn write(&self, path: impl AsRef<Path>) -> TopologyResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Topology tag as an enum; unrecognized tags become `Custom`.
    pub fn topology_kind(&self) -> TopologyKind {
        self.topology_type.parse().unwrap_or(TopologyKind::Custom)
    }

    /// Build the coupling graph the record describes.
    pub fn to_graph(&self) -> TopologyResult<CouplingGraph> {
        let mut graph = CouplingGraph::new(self.num_qubits, self.topology_kind());
        for &[a, b] in &self.coupling_map {
            graph
                .add_edge(a, b)
                .map_err(|e| TopologyError::malformed("coupling_map", e.to_string()))?;
        }

        let (Some(num_cores), Some(qubits_per_core), Some(global), Some(links)) = (
            self.num_cores,
            self.qubits_per_core,
            self.global_topology.as_deref(),
            self.inter_core_links.as_ref(),
        ) else {
            return Ok(graph);
        };

        if u64::from(num_cores) * u64::from(qubits_per_core) > u64::from(self.num_qubits) {
            return Err(TopologyError::malformed(
                "num_cores",
                format!(
                    "{num_cores} cores of {qubits_per_core} qubits exceed num_qubits {}",
                    self.num_qubits
                ),
            ));
        }
        let global_topology = global
            .parse::<CoreArrangement>()
            .map_err(|e| TopologyError::malformed("global_topology", e.to_string()))?;

        let mut inter_core_links = Vec::with_capacity(links.len());
        for &[a, b] in links {
            if a == b || a >= self.num_qubits || b >= self.num_qubits {
                return Err(TopologyError::malformed(
                    "inter_core_links",
                    format!("link ({a}, {b}) is not a valid edge"),
                ));
            }
            // Files often list both directions of each link.
            if !inter_core_links.contains(&(b, a)) && !inter_core_links.contains(&(a, b)) {
                inter_core_links.push((a, b));
            }
        }

        graph.with_modular(ModularInfo {
            num_cores,
            qubits_per_core,
            global_topology,
            inter_core_links,
        })
    }
}

impl From<&CouplingGraph> for CouplingMapFile {
    fn from(graph: &CouplingGraph) -> Self {
        let modular = graph.modular();
        Self {
            topology_type: graph.topology().to_string(),
            num_qubits: graph.num_qubits(),
            coupling_map: graph.edge_list(),
            num_cores: modular.map(|m| m.num_cores),
            qubits_per_core: modular.map(|m| m.qubits_per_core),
            global_topology: modular.map(|m| m.global_topology.to_string()),
            inter_core_links: modular
                .map(|m| m.inter_core_links.iter().map(|&(a, b)| [a, b]).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical;

    #[test]
    fn test_parse_flat_file() {
        let json = r#"{
            "topology_type": "ring",
            "num_qubits": 4,
            "coupling_map": [[0, 1], [1, 2], [2, 3], [3, 0]]
        }"#;
        let file = CouplingMapFile::from_json_str(json).unwrap();
        let graph = file.to_graph().unwrap();

        assert_eq!(graph.topology(), TopologyKind::Ring);
        assert_eq!(graph.num_edges(), 4);
        assert!(!graph.is_modular());
    }

    #[test]
    fn test_directed_duplicates_collapse() {
        let json = r#"{
            "topology_type": "custom",
            "num_qubits": 3,
            "coupling_map": [[0, 1], [1, 0], [1, 2], [2, 1]]
        }"#;
        let graph = CouplingMapFile::from_json_str(json)
            .unwrap()
            .to_graph()
            .unwrap();
        assert_eq!(graph.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let cases = [
            (r#"{"topology_type": 7, "num_qubits": 2, "coupling_map": []}"#, "topology_type"),
            (r#"{"topology_type": "line", "coupling_map": []}"#, "num_qubits"),
            (r#"{"topology_type": "line", "num_qubits": 2}"#, "coupling_map"),
            (
                r#"{"topology_type": "line", "num_qubits": 2, "coupling_map": [[0]]}"#,
                "coupling_map",
            ),
            (
                r#"{"topology_type": "x", "num_qubits": 4, "coupling_map": [], "num_cores": 2}"#,
                "qubits_per_core",
            ),
        ];
        for (json, expected) in cases {
            match CouplingMapFile::from_json_str(json) {
                Err(TopologyError::MalformedCouplingMapFile { field, .. }) => {
                    assert_eq!(field, expected, "for {json}");
                }
                other => panic!("expected malformed error for {json}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_out_of_range_edge_reported_against_coupling_map() {
        let json = r#"{"topology_type": "line", "num_qubits": 2, "coupling_map": [[0, 5]]}"#;
        let err = CouplingMapFile::from_json_str(json)
            .unwrap()
            .to_graph()
            .unwrap_err();
        assert!(matches!(
            err,
            TopologyError::MalformedCouplingMapFile { ref field, .. } if field == "coupling_map"
        ));
    }

    #[test]
    fn test_parse_modular_file() {
        let json = r#"{
            "topology_type": "modular_ring",
            "num_qubits": 6,
            "coupling_map": [[0, 1], [1, 2], [2, 0], [3, 4], [4, 5], [5, 3], [2, 3], [3, 2]],
            "num_cores": 2,
            "qubits_per_core": 3,
            "global_topology": "Ring",
            "inter_core_links": [[2, 3], [3, 2]]
        }"#;
        let file = CouplingMapFile::from_json_str(json).unwrap();
        assert_eq!(file.topology_kind(), TopologyKind::Custom);

        let graph = file.to_graph().unwrap();
        let info = graph.modular().unwrap();
        assert_eq!(info.global_topology, CoreArrangement::Ring);
        assert_eq!(info.inter_core_links, vec![(2, 3)]);
        assert_eq!(graph.num_edges(), 7);
        assert_eq!(graph.intra_core_edges().len(), 6);
    }

    #[test]
    fn test_untagged_modular_file_reads_as_custom() {
        // 4 all-to-all cores of 5 qubits in a 2x2 grid, both edge directions listed
        let mut coupling_map = Vec::new();
        for core in 0..4u32 {
            let offset = core * 5;
            for i in 0..5 {
                for j in (i + 1)..5 {
                    coupling_map.push([offset + i, offset + j]);
                    coupling_map.push([offset + j, offset + i]);
                }
            }
        }
        let links = [[4, 5], [4, 10], [9, 15], [14, 15]];
        coupling_map.extend(links);
        let json = serde_json::json!({
            "num_qubits": 20,
            "num_cores": 4,
            "qubits_per_core": 5,
            "global_topology": "Grid",
            "inter_core_links": links,
            "coupling_map": coupling_map,
        });

        let file = CouplingMapFile::from_value(&json).unwrap();
        assert_eq!(file.topology_type, "custom");
        assert_eq!(file.topology_kind(), TopologyKind::Custom);

        let graph = file.to_graph().unwrap();
        let info = graph.modular().unwrap();
        assert_eq!(info.global_topology, CoreArrangement::Grid);
        assert_eq!(info.inter_core_links, vec![(4, 5), (4, 10), (9, 15), (14, 15)]);
        assert_eq!(graph.num_edges(), 4 * 10 + 4);

        let typed: CouplingMapFile = serde_json::from_value(json).unwrap();
        assert_eq!(typed.topology_type, "custom");
    }

    #[test]
    fn test_graph_to_file_and_back() {
        let graph = canonical::heavy_hex(3).unwrap();
        let file = CouplingMapFile::from(&graph);
        assert_eq!(file.topology_type, "heavy_hex");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hh.json");
        file.write(&path).unwrap();

        let back = CouplingMapFile::from_path(&path).unwrap().to_graph().unwrap();
        assert_eq!(back, graph);
    }
}
