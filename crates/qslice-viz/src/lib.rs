//! qslice visualization layer
//!
//! Collects logical and compiled circuits into a [`Session`], schedules
//! them, classifies routing operations and exports the JSON bundle a
//! visualizer front end animates.
//!
//! # Core Components
//!
//! - [`VisualizerSettings`] / [`SettingsOverrides`]: session defaults and
//!   per-circuit overrides, merged as a pure function
//! - [`CircuitRecord`]: one scheduled circuit with its device and statistics
//! - [`Session`]: caller-owned, append-only record list
//! - [`Bundle`]: the exported document
//!
//! # Bundle layout
//!
//! ```text
//! {
//!   "circuits": [
//!     {
//!       "circuit_info": { "num_qubits": 3, "slices": [[{"name": "h", "qubits": [0]}], ...] },
//!       "routing_info": { "routing_slices": [...], "total_swap_count": 1, ... },
//!       "device_info": { "source": ..., "topology_type": "line", "coupling_map": [[0, 1], ...] },
//!       "algorithm_name": "ghz on line",
//!       "circuit_type": "compiled",
//!       "circuit_stats": { "original_gates": 3, "depth": 3, ... },
//!       "algorithm_params": {},
//!       "settings": { "qubit_size": 1.5, ... }
//!     }
//!   ],
//!   "total_circuits": 1,
//!   "settings": { "qubit_size": 1.5, ... }
//! }
//! ```

pub mod error;
pub mod export;
pub mod record;
pub mod session;
pub mod settings;

pub use error::{VizError, VizResult};
pub use export::{Bundle, BundleEntry, CircuitInfo, ExportConfig};
pub use record::{CircuitKind, CircuitRecord, CircuitStats, DeviceInfo};
pub use session::{CircuitOptions, Session};
pub use settings::{SETTING_KEYS, SettingsOverrides, VisualizerSettings};
