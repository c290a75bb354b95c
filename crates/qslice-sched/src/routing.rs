//! Recognizing the operations a compiler inserted to move qubits around.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qslice_ir::{CircuitSource, Operation};

use crate::error::ScheduleResult;
use crate::schedule::{Schedule, TimeSlice, schedule};

/// Gate names treated as routing operations by default.
pub const DEFAULT_ROUTING_NAMES: [&str; 3] = ["swap", "bridge", "iswap"];

/// Decides which operations are routing operations.
///
/// Names are matched case-insensitively, so `SWAP`, `Swap` and `swap` are the
/// same gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingClassifier {
    names: FxHashSet<String>,
}

impl Default for RoutingClassifier {
    fn default() -> Self {
        Self::from_names(DEFAULT_ROUTING_NAMES)
    }
}

impl RoutingClassifier {
    /// Classifier with an explicit name set and no defaults.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Also treat `name` as a routing operation.
    #[must_use]
    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.names.insert(name.as_ref().to_ascii_lowercase());
        self
    }

    /// Whether `op` is a routing operation.
    pub fn is_routing(&self, op: &Operation) -> bool {
        self.is_routing_name(op.name())
    }

    /// Whether a gate name denotes a routing operation.
    pub fn is_routing_name(&self, name: &str) -> bool {
        self.names.contains(&name.to_ascii_lowercase())
    }

    /// Whether `op` is literally a SWAP.
    pub fn is_swap(&self, op: &Operation) -> bool {
        op.name_matches("swap")
    }

    /// Recognized names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Routing operations of a compiled circuit, slice-aligned with its full
/// schedule.
///
/// Slice `i` holds only the routing operations of scheduled slice `i`; slices
/// without any are kept as empty placeholders so indices line up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingSummary {
    /// Qubit count of the compiled circuit.
    pub num_qubits: u32,
    /// Per-slice routing operations.
    pub routing_slices: Vec<TimeSlice>,
    /// Operations named `swap`.
    pub total_swap_count: usize,
    /// All routing operations, swaps included.
    pub total_routing_op_count: usize,
    /// Index of the last slice holding a routing operation plus one; 0 when
    /// there are none.
    pub routing_depth: usize,
}

impl RoutingSummary {
    /// Filter an existing schedule down to its routing operations.
    pub fn from_schedule(
        num_qubits: u32,
        schedule: &Schedule,
        classifier: &RoutingClassifier,
    ) -> Self {
        let mut total_swap_count = 0;
        let mut total_routing_op_count = 0;
        let mut routing_depth = 0;

        let routing_slices = schedule
            .slices()
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let routing: TimeSlice = slice
                    .iter()
                    .filter(|op| classifier.is_routing(op))
                    .cloned()
                    .collect();
                if !routing.is_empty() {
                    routing_depth = i + 1;
                    total_routing_op_count += routing.len();
                    total_swap_count += routing.iter().filter(|op| classifier.is_swap(op)).count();
                }
                routing
            })
            .collect();

        Self {
            num_qubits,
            routing_slices,
            total_swap_count,
            total_routing_op_count,
            routing_depth,
        }
    }

    /// Whether the circuit contains no routing operations.
    pub fn is_empty(&self) -> bool {
        self.total_routing_op_count == 0
    }
}

/// Schedule a compiled circuit and keep only its routing operations.
///
/// ```rust
/// use qslice_ir::{Circuit, QubitId};
/// use qslice_sched::{RoutingClassifier, extract_routing};
///
/// let mut compiled = Circuit::new("routed", 3);
/// compiled.x(QubitId(0)).unwrap();
/// compiled.cx(QubitId(0), QubitId(1)).unwrap();
/// compiled.swap(QubitId(0), QubitId(2)).unwrap();
///
/// let routing = extract_routing(&compiled, &RoutingClassifier::default()).unwrap();
/// assert_eq!(routing.total_swap_count, 1);
/// assert_eq!(routing.routing_depth, 3);
/// ```
pub fn extract_routing<C: CircuitSource + ?Sized>(
    compiled: &C,
    classifier: &RoutingClassifier,
) -> ScheduleResult<RoutingSummary> {
    let schedule = schedule(compiled)?;
    let summary = RoutingSummary::from_schedule(compiled.num_qubits(), &schedule, classifier);

    debug!(
        routing_ops = summary.total_routing_op_count,
        swaps = summary.total_swap_count,
        routing_depth = summary.routing_depth,
        "extracted routing operations"
    );

    Ok(summary)
}
