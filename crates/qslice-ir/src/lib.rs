//! qslice circuit data model
//!
//! This crate holds the small set of types every other qslice crate agrees
//! on: qubit ids, gate operations and circuits in program order.
//!
//! # Core Components
//!
//! - [`QubitId`]: index of a qubit, serialized as a bare integer
//! - [`Operation`]: an immutable `(name, qubits)` pair
//! - [`Circuit`]: a validated operation list with a declared qubit count
//! - [`CircuitSource`]: the seam through which schedulers and analyzers read
//!   circuits, so external frontends can plug in their own circuit types
//!
//! # Example
//!
//! ```rust
//! use qslice_ir::{Circuit, CircuitSource, QubitId};
//!
//! let mut circuit = Circuit::new("ghz", 3);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(1), QubitId(2)).unwrap();
//!
//! assert_eq!(circuit.operations()[1].to_string(), "cx(0,1)");
//! ```

pub mod circuit;
pub mod error;
pub mod operation;
pub mod qubit;

pub use circuit::{Circuit, CircuitSource};
pub use error::{IrError, IrResult};
pub use operation::Operation;
pub use qubit::QubitId;
