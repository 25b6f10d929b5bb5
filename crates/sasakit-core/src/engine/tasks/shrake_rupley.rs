use crate::engine::error::EngineError;
use crate::engine::neighbors::NeighborList;
use crate::engine::parallel::map_atoms;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;
use tracing::{debug, instrument};

/// Places `n` points on the unit sphere along a golden-section spiral.
///
/// The points are evenly spread and fully determined by `n`.
pub fn sphere_points(n: usize) -> Vec<Vector3<f64>> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let dz = 2.0 / n as f64;
    (0..n)
        .map(|k| {
            let z = 1.0 - dz / 2.0 - k as f64 * dz;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let longitude = k as f64 * golden_angle;
            Vector3::new(longitude.cos() * r, longitude.sin() * r, z)
        })
        .collect()
}

#[instrument(skip_all, name = "shrake_rupley_task", fields(atoms = positions.len(), n_points = n_points))]
pub fn run(
    positions: &[Point3<f64>],
    radii: &[f64],
    neighbors: &NeighborList,
    n_points: usize,
    n_threads: usize,
) -> Result<Vec<f64>, EngineError> {
    let points = sphere_points(n_points);
    debug!(pairs = neighbors.pair_count(), "Sampling test points");
    map_atoms(positions.len(), n_threads, |i| {
        atom_area(i, positions, radii, neighbors, &points)
    })
}

fn atom_area(
    i: usize,
    positions: &[Point3<f64>],
    radii: &[f64],
    neighbors: &NeighborList,
    points: &[Vector3<f64>],
) -> f64 {
    let ri = radii[i];
    if ri <= 0.0 || points.is_empty() {
        return 0.0;
    }
    let center = positions[i];
    let nbs = neighbors.of(i);

    // Neighbors tend to bury runs of adjacent points, so the last hit is tried first.
    let mut last_hit = 0;
    let exposed = points
        .iter()
        .filter(|u| {
            let p = center + *u * ri;
            let buried_by = |k: usize| {
                let nb = &nbs[k];
                let rj = radii[nb.index];
                (p - positions[nb.index]).norm_squared() < rj * rj
            };
            if last_hit < nbs.len() && buried_by(last_hit) {
                return false;
            }
            match (0..nbs.len()).find(|&k| k != last_hit && buried_by(k)) {
                Some(k) => {
                    last_hit = k;
                    false
                }
                None => true,
            }
        })
        .count();

    4.0 * PI * ri * ri * exposed as f64 / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_points_lie_on_unit_sphere() {
        for p in sphere_points(200) {
            assert!((p.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sphere_points_are_balanced() {
        let centroid: Vector3<f64> = sphere_points(1000).iter().sum::<Vector3<f64>>() / 1000.0;
        assert!(centroid.norm() < 1e-2);
    }

    #[test]
    fn sphere_points_are_deterministic() {
        assert_eq!(sphere_points(100), sphere_points(100));
        assert!(sphere_points(0).is_empty());
    }

    #[test]
    fn isolated_atom_has_full_area() {
        let positions = [Point3::origin()];
        let radii = [2.0];
        let nl = NeighborList::build(&positions, &radii);
        let areas = run(&positions, &radii, &nl, 100, 1).unwrap();
        assert!((areas[0] - 4.0 * PI * 4.0).abs() < 1e-9);
    }

    #[test]
    fn engulfed_atom_has_zero_area() {
        let positions = [Point3::origin(), Point3::new(0.1, 0.0, 0.0)];
        let radii = [1.0, 5.0];
        let nl = NeighborList::build(&positions, &radii);
        let areas = run(&positions, &radii, &nl, 100, 1).unwrap();
        assert_eq!(areas[0], 0.0);
        assert!(areas[1] > 0.0);
    }

    #[test]
    fn half_overlap_buries_about_half_of_the_smaller_cap() {
        // Two unit spheres one radius apart: each loses a cap of height 1/2,
        // i.e. a quarter of its surface.
        let positions = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let radii = [1.0, 1.0];
        let nl = NeighborList::build(&positions, &radii);
        let areas = run(&positions, &radii, &nl, 2000, 1).unwrap();
        let expected = 0.75 * 4.0 * PI;
        assert!((areas[0] - expected).abs() / expected < 0.02);
        assert!((areas[0] - areas[1]).abs() / expected < 0.02);
    }
}
