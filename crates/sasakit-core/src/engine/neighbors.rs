use nalgebra::Point3;
use std::collections::HashMap;

type Cell = (i64, i64, i64);

/// A neighboring atom, with its xy-plane offset relative to the owning atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub dx: f64,
    pub dy: f64,
    pub xy_distance: f64,
}

/// Symmetric overlap relation between inflated spheres.
///
/// Atom `j` is a neighbor of `i` when `|xi - xj| < ri + rj`, `j != i`. Each list is
/// sorted by index and contains every neighbor exactly once.
#[derive(Debug, Clone, Default)]
pub struct NeighborList {
    neighbors: Vec<Vec<Neighbor>>,
}

#[allow(clippy::cast_possible_truncation)]
fn cell_of(p: &Point3<f64>, cell_size: f64) -> Cell {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}

impl NeighborList {
    /// Builds the list with a uniform cell grid.
    ///
    /// The cell edge is twice the largest radius, so any two overlapping spheres
    /// lie in the same or adjacent cells and only 27 cells need to be searched.
    pub fn build(positions: &[Point3<f64>], radii: &[f64]) -> Self {
        let n = positions.len();
        let max_radius = radii.iter().copied().fold(0.0_f64, f64::max);
        let cell_size = if max_radius > 0.0 { 2.0 * max_radius } else { 1.0 };

        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (i, p) in positions.iter().enumerate() {
            cells.entry(cell_of(p, cell_size)).or_default().push(i);
        }

        let mut neighbors: Vec<Vec<Neighbor>> = vec![Vec::new(); n];
        for (i, pi) in positions.iter().enumerate() {
            let (cx, cy, cz) = cell_of(pi, cell_size);
            for ox in -1..=1 {
                for oy in -1..=1 {
                    for oz in -1..=1 {
                        let Some(members) = cells.get(&(cx + ox, cy + oy, cz + oz)) else {
                            continue;
                        };
                        for &j in members.iter().filter(|&&j| j > i) {
                            let pj = &positions[j];
                            let cutoff = radii[i] + radii[j];
                            if (pj - pi).norm_squared() >= cutoff * cutoff {
                                continue;
                            }
                            let dx = pj.x - pi.x;
                            let dy = pj.y - pi.y;
                            let xy_distance = dx.hypot(dy);
                            neighbors[i].push(Neighbor {
                                index: j,
                                dx,
                                dy,
                                xy_distance,
                            });
                            neighbors[j].push(Neighbor {
                                index: i,
                                dx: -dx,
                                dy: -dy,
                                xy_distance,
                            });
                        }
                    }
                }
            }
        }

        for list in &mut neighbors {
            list.sort_unstable_by_key(|nb| nb.index);
        }
        Self { neighbors }
    }

    pub fn of(&self, index: usize) -> &[Neighbor] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Total number of directed neighbor entries.
    pub fn pair_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }
}
