//! Canonical device layouts.
//!
//! Every generator is a pure function of its parameters. The `*_for_qubits`
//! constructors choose lattice parameters from a qubit budget; the resulting
//! graph may hold more qubits than requested, never fewer.

use tracing::debug;

use crate::coupling::{CouplingGraph, TopologyKind};
use crate::error::{TopologyError, TopologyResult};

fn check_size(kind: TopologyKind, n: u32) -> TopologyResult<()> {
    if n == 0 {
        return Err(TopologyError::InvalidSize {
            topology: kind.to_string(),
            size: n,
        });
    }
    Ok(())
}

fn too_large(what: impl std::fmt::Display) -> TopologyError {
    TopologyError::InvalidParameter(format!("{what} needs more than {} qubits", u32::MAX))
}

fn check_distance(kind: TopologyKind, distance: u32) -> TopologyResult<()> {
    if distance == 0 || distance % 2 == 0 {
        return Err(TopologyError::InvalidParameter(format!(
            "{kind} distance must be a positive odd integer, got {distance}"
        )));
    }
    Ok(())
}

/// Smallest `s` with `s * s >= n`.
pub(crate) fn ceil_sqrt(n: u32) -> u32 {
    let n = u64::from(n);
    let mut s = (n as f64).sqrt() as u64;
    while s * s < n {
        s += 1;
    }
    while s > 0 && (s - 1) * (s - 1) >= n {
        s -= 1;
    }
    // at most 65536
    s as u32
}

/// Build the graph for `kind` sized to hold at least `n` qubits.
///
/// `Custom` has no canonical shape and is rejected.
pub fn generate(kind: TopologyKind, n: u32) -> TopologyResult<CouplingGraph> {
    let graph = match kind {
        TopologyKind::Line => line(n),
        TopologyKind::Ring => ring(n),
        TopologyKind::Grid => grid(n),
        TopologyKind::HeavyHex => heavy_hex_for_qubits(n),
        TopologyKind::HeavySquare => heavy_square_for_qubits(n),
        TopologyKind::Hexagonal => hexagonal_for_qubits(n),
        TopologyKind::Full => full(n),
        TopologyKind::Custom => Err(TopologyError::InvalidParameter(
            "custom topologies have no canonical generator".into(),
        )),
    }?;
    debug!(
        topology = %kind,
        requested = n,
        qubits = graph.num_qubits(),
        edges = graph.num_edges(),
        "generated coupling graph"
    );
    Ok(graph)
}

/// Path `0-1-2-...-(n-1)`.
pub fn line(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::Line, n)?;
    let mut graph = CouplingGraph::new(n, TopologyKind::Line);
    for i in 0..n - 1 {
        graph.insert_edge(i, i + 1);
    }
    Ok(graph)
}

/// Cycle over `n` qubits. One qubit has no edges; two qubits share one.
pub fn ring(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::Ring, n)?;
    let mut graph = CouplingGraph::new(n, TopologyKind::Ring);
    if n > 1 {
        for i in 0..n {
            graph.insert_edge(i, (i + 1) % n);
        }
    }
    Ok(graph)
}

/// Square grid with side `ceil(sqrt(n))`, numbered row by row.
pub fn grid(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::Grid, n)?;
    let side = ceil_sqrt(n);
    grid_rect(side, side)
}

/// `rows x cols` nearest-neighbour grid, numbered row by row.
pub fn grid_rect(rows: u32, cols: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::Grid, rows)?;
    check_size(TopologyKind::Grid, cols)?;
    let total = rows
        .checked_mul(cols)
        .ok_or_else(|| too_large(format!("{rows}x{cols} grid")))?;
    let mut graph = CouplingGraph::new(total, TopologyKind::Grid);
    for r in 0..rows {
        for c in 0..cols {
            let q = r * cols + c;
            if c + 1 < cols {
                graph.insert_edge(q, q + 1);
            }
            if r + 1 < rows {
                graph.insert_edge(q, q + cols);
            }
        }
    }
    Ok(graph)
}

/// Complete graph on `n` qubits.
pub fn full(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::Full, n)?;
    let mut graph = CouplingGraph::new(n, TopologyKind::Full);
    for i in 0..n {
        for j in (i + 1)..n {
            graph.insert_edge(i, j);
        }
    }
    Ok(graph)
}

/// Qubits in a heavy-hex lattice of odd distance `d`: `(5d² - 2d - 1) / 2`.
///
/// `None` when `d` is zero or the count does not fit in a `u32`.
pub fn heavy_hex_qubits(d: u32) -> Option<u32> {
    let total = 5u32
        .checked_mul(d)?
        .checked_mul(d)?
        .checked_sub(2 * d + 1)?;
    Some(total / 2)
}

/// Qubits in a heavy-square lattice of odd distance `d`: `3d² - 2d`.
///
/// `None` when the count does not fit in a `u32`.
pub fn heavy_square_qubits(d: u32) -> Option<u32> {
    3u32.checked_mul(d)?.checked_mul(d)?.checked_sub(2 * d)
}

fn smallest_odd_distance(
    kind: TopologyKind,
    n: u32,
    qubits: impl Fn(u32) -> Option<u32>,
) -> TopologyResult<u32> {
    let mut d = 1;
    loop {
        match qubits(d) {
            Some(count) if count >= n => return Ok(d),
            Some(_) => d += 2,
            None => return Err(too_large(format!("{kind} lattice holding {n} qubits"))),
        }
    }
}

/// Heavy-hex lattice sized to hold at least `n` qubits.
pub fn heavy_hex_for_qubits(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::HeavyHex, n)?;
    heavy_hex(smallest_odd_distance(TopologyKind::HeavyHex, n, heavy_hex_qubits)?)
}

/// Heavy-square lattice sized to hold at least `n` qubits.
pub fn heavy_square_for_qubits(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::HeavySquare, n)?;
    heavy_square(smallest_odd_distance(TopologyKind::HeavySquare, n, heavy_square_qubits)?)
}

/// Qubit groups shared by the heavy lattices: `d²` data qubits, then the
/// syndrome qubits, then `d(d-1)` flag qubits sitting between horizontally
/// adjacent data qubits.
struct HeavyLattice {
    d: u32,
    syndrome_base: u32,
    flag_base: u32,
}

impl HeavyLattice {
    fn new(d: u32, num_syndrome: u32) -> Self {
        Self {
            d,
            syndrome_base: d * d,
            flag_base: d * d + num_syndrome,
        }
    }

    fn data(&self, i: u32) -> u32 {
        i
    }

    fn syndrome(&self, i: u32) -> u32 {
        self.syndrome_base + i
    }

    fn flag(&self, i: u32) -> u32 {
        self.flag_base + i
    }

    /// Each row of `d` data qubits is chained through `d - 1` flags.
    fn link_data_rows(&self, graph: &mut CouplingGraph) {
        let d = self.d;
        for row in 0..d {
            for j in 0..d - 1 {
                let flag = self.flag(row * (d - 1) + j);
                graph.insert_edge(self.data(row * d + j), flag);
                graph.insert_edge(flag, self.data(row * d + j + 1));
            }
        }
    }

    /// Syndrome rows alternate between closing the right and the left
    /// boundary of the lattice.
    fn link_boundary(&self, graph: &mut CouplingGraph, row: u32, first: u32, last: u32) {
        let d = self.d;
        if row % 2 == 0 {
            graph.insert_edge(self.data(row * d + (d - 1)), last);
            graph.insert_edge(last, self.data(row * d + (2 * d - 1)));
        } else {
            graph.insert_edge(self.data(row * d), first);
            graph.insert_edge(first, self.data(row * d + d));
        }
    }
}

/// IBM heavy-hex lattice of odd distance `d`.
///
/// `d = 3` yields the familiar 19-qubit, 20-edge layout.
pub fn heavy_hex(d: u32) -> TopologyResult<CouplingGraph> {
    check_distance(TopologyKind::HeavyHex, d)?;
    let total =
        heavy_hex_qubits(d).ok_or_else(|| too_large(format!("heavy_hex distance {d}")))?;
    let mut graph = CouplingGraph::new(total, TopologyKind::HeavyHex);
    if d == 1 {
        return Ok(graph);
    }

    let per_row = (d + 1) / 2;
    let lattice = HeavyLattice::new(d, (d - 1) * per_row);
    lattice.link_data_rows(&mut graph);

    for row in 0..d - 1 {
        let first = lattice.syndrome(row * per_row);
        let last = lattice.syndrome(row * per_row + per_row - 1);
        lattice.link_boundary(&mut graph, row, first, last);

        for j in 0..per_row {
            let syndrome = lattice.syndrome(row * per_row + j);
            let flag_offset = if row % 2 == 0 {
                if j == per_row - 1 {
                    continue;
                }
                2 * j
            } else {
                if j == 0 {
                    continue;
                }
                2 * (j - 1) + 1
            };
            graph.insert_edge(lattice.flag(row * (d - 1) + flag_offset), syndrome);
            graph.insert_edge(lattice.flag((row + 1) * (d - 1) + flag_offset), syndrome);
        }
    }
    Ok(graph)
}

/// Heavy-square lattice of odd distance `d`.
pub fn heavy_square(d: u32) -> TopologyResult<CouplingGraph> {
    check_distance(TopologyKind::HeavySquare, d)?;
    let total = heavy_square_qubits(d)
        .ok_or_else(|| too_large(format!("heavy_square distance {d}")))?;
    let mut graph = CouplingGraph::new(total, TopologyKind::HeavySquare);
    if d == 1 {
        return Ok(graph);
    }

    let lattice = HeavyLattice::new(d, d * (d - 1));
    lattice.link_data_rows(&mut graph);

    for row in 0..d - 1 {
        let first = lattice.syndrome(row * d);
        let last = lattice.syndrome(row * d + d - 1);
        lattice.link_boundary(&mut graph, row, first, last);

        for j in 0..d {
            let syndrome = lattice.syndrome(row * d + j);
            let flag_offset = if row % 2 == 0 {
                if j == d - 1 {
                    continue;
                }
                j
            } else {
                if j == 0 {
                    continue;
                }
                j - 1
            };
            graph.insert_edge(syndrome, lattice.flag(row * (d - 1) + flag_offset));
            graph.insert_edge(lattice.flag((row + 1) * (d - 1) + flag_offset), syndrome);
        }
    }
    Ok(graph)
}

/// Qubits in a `rows x cols` hexagonal lattice.
///
/// `None` when the count does not fit in a `u32`.
pub fn hexagonal_qubits(rows: u32, cols: u32) -> Option<u32> {
    rows.checked_mul(cols)?
        .checked_add(rows)?
        .checked_add(cols)?
        .checked_mul(2)
}

/// Honeycomb lattice of `rows x cols` hexagons.
///
/// Qubits form `cols + 1` vertical chains of `2 * rows + 2` sites joined by
/// alternating rungs; the two corner sites that would only dangle off a
/// single edge are left out.
pub fn hexagonal(rows: u32, cols: u32) -> TopologyResult<CouplingGraph> {
    if rows == 0 || cols == 0 {
        return Err(TopologyError::InvalidParameter(format!(
            "hexagonal lattice needs at least one row and column, got {rows}x{cols}"
        )));
    }
    // site ids below run two past the qubit count
    if hexagonal_qubits(rows, cols).and_then(|q| q.checked_add(2)).is_none() {
        return Err(too_large(format!("{rows}x{cols} hexagonal lattice")));
    }
    let chain = 2 * rows + 2;
    let dropped_top = (0, chain - 1);
    let dropped_last = if cols % 2 == 1 {
        (cols, chain - 1)
    } else {
        (cols, 0)
    };

    // Site (column, row) -> qubit id, numbered column by column.
    let mut ids = vec![None; ((cols + 1) * chain) as usize];
    let mut next = 0u32;
    for c in 0..=cols {
        for r in 0..chain {
            if (c, r) != dropped_top && (c, r) != dropped_last {
                ids[(c * chain + r) as usize] = Some(next);
                next += 1;
            }
        }
    }
    let id = |c: u32, r: u32| ids[(c * chain + r) as usize];

    let mut graph = CouplingGraph::new(next, TopologyKind::Hexagonal);
    for c in 0..=cols {
        for r in 0..chain - 1 {
            if let (Some(a), Some(b)) = (id(c, r), id(c, r + 1)) {
                graph.insert_edge(a, b);
            }
        }
    }
    for c in 0..cols {
        for r in (c % 2..chain).step_by(2) {
            if let (Some(a), Some(b)) = (id(c, r), id(c + 1, r)) {
                graph.insert_edge(a, b);
            }
        }
    }
    Ok(graph)
}

/// Hexagonal lattice with `rows = max(2, floor(sqrt(n / 2)))` and
/// `cols = max(2, n / rows)`.
pub fn hexagonal_for_qubits(n: u32) -> TopologyResult<CouplingGraph> {
    check_size(TopologyKind::Hexagonal, n)?;
    let rows = ((f64::from(n) / 2.0).sqrt() as u32).max(2);
    let cols = (n / rows).max(2);
    hexagonal(rows, cols)
}
