//! qslice topology generators
//!
//! Produces [`CouplingGraph`]s: the undirected qubit-pair graphs that
//! circuits are mapped onto by an external compiler.
//!
//! # Canonical layouts
//!
//! | Topology | Constructor | Qubits |
//! |----------|-------------|--------|
//! | line | [`line`] | n |
//! | ring | [`ring`] | n |
//! | grid | [`grid`] | ceil(sqrt(n))² |
//! | heavy-hex | [`heavy_hex`] / [`heavy_hex_for_qubits`] | (5d² − 2d − 1) / 2 |
//! | heavy-square | [`heavy_square`] / [`heavy_square_for_qubits`] | 3d² − 2d |
//! | hexagonal | [`hexagonal`] / [`hexagonal_for_qubits`] | 2rc + 2r + 2c |
//! | full | [`full`] | n |
//!
//! # Modular layouts
//!
//! [`ModularSpec`] builds several cores (all-to-all, ring or grid inside)
//! joined by inter-core links in a ring or grid of cores. The links are kept
//! as a separate subset in [`ModularInfo`].
//!
//! ```rust
//! use qslice_topo::{CoreArrangement, CoreTopology, ModularSpec, TopologyKind, generate};
//!
//! let ring = generate(TopologyKind::Ring, 5).unwrap();
//! assert_eq!(ring.num_edges(), 5);
//!
//! let modular = ModularSpec::new(4, 5, CoreTopology::AllToAll, CoreArrangement::Grid)
//!     .build()
//!     .unwrap();
//! assert_eq!(modular.modular().unwrap().inter_core_links.len(), 4);
//! ```

pub mod canonical;
pub mod coupling;
pub mod error;
pub mod file;
pub mod modular;

pub use canonical::{
    full, generate, grid, grid_rect, heavy_hex, heavy_hex_for_qubits, heavy_hex_qubits,
    heavy_square, heavy_square_for_qubits, heavy_square_qubits, hexagonal, hexagonal_for_qubits,
    hexagonal_qubits, line, ring,
};
pub use coupling::{CoreArrangement, CouplingGraph, ModularInfo, TopologyKind};
pub use error::{TopologyError, TopologyResult};
pub use file::CouplingMapFile;
pub use modular::{CoreTopology, ModularSpec};
