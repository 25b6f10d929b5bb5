use crate::engine::error::EngineError;
use crate::engine::neighbors::NeighborList;
use crate::engine::parallel::map_atoms;
use nalgebra::Point3;
use std::f64::consts::PI;
use tracing::{debug, instrument};

const TWO_PI: f64 = 2.0 * PI;

#[instrument(skip_all, name = "lee_richards_task", fields(atoms = positions.len(), n_slices = n_slices))]
pub fn run(
    positions: &[Point3<f64>],
    radii: &[f64],
    neighbors: &NeighborList,
    n_slices: usize,
    n_threads: usize,
) -> Result<Vec<f64>, EngineError> {
    debug!(pairs = neighbors.pair_count(), "Slicing atoms");
    map_atoms(positions.len(), n_threads, |i| {
        atom_area(i, positions, radii, neighbors, n_slices)
    })
}

/// Sums the exposed arc of each slice, weighted so that every slice of an
/// isolated sphere contributes exactly `2π r δ`.
fn atom_area(
    i: usize,
    positions: &[Point3<f64>],
    radii: &[f64],
    neighbors: &NeighborList,
    n_slices: usize,
) -> f64 {
    let ri = radii[i];
    if ri <= 0.0 || n_slices == 0 {
        return 0.0;
    }
    let zi = positions[i].z;
    let delta = 2.0 * ri / n_slices as f64;
    let nbs = neighbors.of(i);
    let mut arcs: Vec<(f64, f64)> = Vec::with_capacity(2 * nbs.len());

    let mut area = 0.0;
    for s in 0..n_slices {
        let z = zi - ri + delta * (s as f64 + 0.5);
        let dz = z - zi;
        let ri_s = (ri * ri - dz * dz).sqrt();

        arcs.clear();
        let mut buried = false;
        for nb in nbs {
            let rj = radii[nb.index];
            let dzj = z - positions[nb.index].z;
            if dzj.abs() >= rj {
                continue;
            }
            let rj_s = (rj * rj - dzj * dzj).sqrt();
            let d = nb.xy_distance;

            if d >= ri_s + rj_s {
                continue;
            }
            if d + ri_s <= rj_s {
                buried = true;
                break;
            }
            if d + rj_s <= ri_s {
                continue;
            }

            let cos_alpha = (ri_s * ri_s + d * d - rj_s * rj_s) / (2.0 * ri_s * d);
            let alpha = cos_alpha.clamp(-1.0, 1.0).acos();
            let mut beta = nb.dy.atan2(nb.dx);
            if beta < 0.0 {
                beta += TWO_PI;
            }
            push_arc(&mut arcs, beta - alpha, beta + alpha);
        }

        if !buried {
            area += exposed_arc(&mut arcs) * ri * delta;
        }
    }
    area
}

/// Adds the arc `[inf, sup]`, splitting it where it wraps past 0 or 2π.
fn push_arc(arcs: &mut Vec<(f64, f64)>, inf: f64, sup: f64) {
    if inf < 0.0 {
        arcs.push((inf + TWO_PI, TWO_PI));
        arcs.push((0.0, sup));
    } else if sup > TWO_PI {
        arcs.push((inf, TWO_PI));
        arcs.push((0.0, sup - TWO_PI));
    } else {
        arcs.push((inf, sup));
    }
}

/// Angle of the circle left uncovered by `arcs`.
fn exposed_arc(arcs: &mut [(f64, f64)]) -> f64 {
    if arcs.is_empty() {
        return TWO_PI;
    }
    arcs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

    let mut exposed = 0.0;
    let mut covered_to = 0.0;
    for &(inf, sup) in arcs.iter() {
        if inf > covered_to {
            exposed += inf - covered_to;
        }
        covered_to = f64::max(covered_to, sup);
    }
    exposed + (TWO_PI - covered_to).max(0.0)
}
