//! Routing overhead: what mapping onto hardware cost a circuit.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use qslice_ir::CircuitSource;

use crate::error::ScheduleResult;
use crate::routing::{RoutingClassifier, RoutingSummary};
use crate::schedule::{Schedule, schedule};

/// Comparison of a logical circuit against its compiled form.
///
/// Depths are scheduled slice counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadReport {
    /// Operations in the logical circuit.
    pub logical_op_count: usize,
    /// Operations in the compiled circuit.
    pub compiled_op_count: usize,
    /// Routing operations in the compiled circuit.
    pub routing_op_count: usize,
    /// Routing operations named `swap`.
    pub swap_count: usize,
    /// Slice count of the logical circuit.
    pub logical_depth: usize,
    /// Slice count of the compiled circuit.
    pub compiled_depth: usize,
    /// Extra slices the compiled circuit needs; never negative.
    pub routing_overhead_depth: usize,
    /// Last slice holding a routing operation plus one; 0 without routing.
    pub routing_depth: usize,
    /// Share of compiled operations that are routing, in percent (0-100).
    pub routing_overhead_percentage: f64,
    /// Compiled depth / logical depth; 1.0 when the logical circuit is empty.
    pub depth_ratio: f64,
}

impl OverheadReport {
    /// Build a report from already computed schedules.
    pub fn from_schedules(logical: &Schedule, compiled: &Schedule, routing: &RoutingSummary) -> Self {
        let logical_op_count = logical.num_ops();
        let compiled_op_count = compiled.num_ops();
        let logical_depth = logical.depth();
        let compiled_depth = compiled.depth();
        let routing_op_count = routing.total_routing_op_count;

        Self {
            logical_op_count,
            compiled_op_count,
            routing_op_count,
            swap_count: routing.total_swap_count,
            logical_depth,
            compiled_depth,
            routing_overhead_depth: compiled_depth.saturating_sub(logical_depth),
            routing_depth: routing.routing_depth,
            routing_overhead_percentage: if compiled_op_count > 0 {
                routing_op_count as f64 / compiled_op_count as f64 * 100.0
            } else {
                0.0
            },
            depth_ratio: if logical_depth > 0 {
                compiled_depth as f64 / logical_depth as f64
            } else {
                1.0
            },
        }
    }

    /// Whether compilation inserted any routing operation.
    pub fn has_routing(&self) -> bool {
        self.routing_op_count > 0
    }
}

impl fmt::Display for OverheadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "operations: {} logical, {} compiled",
            self.logical_op_count, self.compiled_op_count
        )?;
        writeln!(
            f,
            "routing:    {} ops ({} swaps), {:.1}% of compiled",
            self.routing_op_count, self.swap_count, self.routing_overhead_percentage
        )?;
        write!(
            f,
            "depth:      {} logical, {} compiled (+{}, x{:.2}), routing depth {}",
            self.logical_depth,
            self.compiled_depth,
            self.routing_overhead_depth,
            self.depth_ratio,
            self.routing_depth
        )
    }
}

/// Schedule both circuits and compare them.
pub fn analyze_overhead<L, C>(
    logical: &L,
    compiled: &C,
    classifier: &RoutingClassifier,
) -> ScheduleResult<OverheadReport>
where
    L: CircuitSource + ?Sized,
    C: CircuitSource + ?Sized,
{
    let logical_schedule = schedule(logical)?;
    let compiled_schedule = schedule(compiled)?;
    let routing =
        RoutingSummary::from_schedule(compiled.num_qubits(), &compiled_schedule, classifier);

    let report = OverheadReport::from_schedules(&logical_schedule, &compiled_schedule, &routing);
    debug!(
        routing_ops = report.routing_op_count,
        overhead_pct = report.routing_overhead_percentage,
        extra_depth = report.routing_overhead_depth,
        "analyzed routing overhead"
    );
    Ok(report)
}
