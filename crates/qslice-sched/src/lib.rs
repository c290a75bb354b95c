//! qslice scheduling and routing analysis
//!
//! Turns a linear operation list into time slices and measures what mapping
//! a circuit onto hardware added to it.
//!
//! # Core Components
//!
//! - [`schedule`]: ASAP layering into [`TimeSlice`]s
//! - [`RoutingClassifier`]: configurable, case-insensitive routing gate names
//! - [`extract_routing`]: slice-aligned routing operations of a compiled circuit
//! - [`analyze_overhead`]: logical vs. compiled comparison as an [`OverheadReport`]
//!
//! # Example
//!
//! ```rust
//! use qslice_ir::{Circuit, QubitId};
//! use qslice_sched::{RoutingClassifier, analyze_overhead};
//!
//! let mut logical = Circuit::new("logical", 3);
//! logical.cx(QubitId(0), QubitId(2)).unwrap();
//!
//! let mut compiled = Circuit::new("compiled", 3);
//! compiled.swap(QubitId(0), QubitId(1)).unwrap();
//! compiled.cx(QubitId(1), QubitId(2)).unwrap();
//!
//! let report = analyze_overhead(&logical, &compiled, &RoutingClassifier::default()).unwrap();
//! assert_eq!(report.swap_count, 1);
//! assert_eq!(report.routing_overhead_depth, 1);
//! ```

pub mod error;
pub mod overhead;
pub mod routing;
pub mod schedule;

pub use error::{ScheduleError, ScheduleResult};
pub use overhead::{OverheadReport, analyze_overhead};
pub use routing::{DEFAULT_ROUTING_NAMES, RoutingClassifier, RoutingSummary, extract_routing};
pub use schedule::{Schedule, TimeSlice, schedule};
