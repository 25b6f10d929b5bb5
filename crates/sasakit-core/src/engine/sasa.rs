use super::config::{Algorithm, Parameters};
use super::error::EngineError;
use super::neighbors::NeighborList;
use super::result::SasaResult;
use super::tasks::{lee_richards, shrake_rupley};
use nalgebra::Point3;
use tracing::{debug, info, instrument};

/// Computes per-atom SASA from coordinates and radii (probe not included).
///
/// # Errors
///
/// Returns [`EngineError::Parameters`] for invalid parameters and
/// [`EngineError::InvalidInput`] when the inputs disagree in length or contain
/// non-finite coordinates or negative radii. Validation happens before any work
/// starts.
#[instrument(skip_all, name = "calc_coord", fields(atoms = positions.len(), algorithm = %params.algorithm()))]
pub fn calc_coord(
    positions: &[Point3<f64>],
    radii: &[f64],
    params: &Parameters,
) -> Result<SasaResult, EngineError> {
    params.validate()?;
    validate_input(positions, radii)?;

    let inflated: Vec<f64> = radii.iter().map(|r| r + params.probe_radius()).collect();
    let neighbors = NeighborList::build(positions, &inflated);
    debug!(pairs = neighbors.pair_count() / 2, "Neighbor list built");
    if neighbors.len() != positions.len() {
        return Err(EngineError::Internal(format!(
            "neighbor list covers {} of {} atoms",
            neighbors.len(),
            positions.len()
        )));
    }

    let areas = match params.algorithm() {
        Algorithm::ShrakeRupley => shrake_rupley::run(
            positions,
            &inflated,
            &neighbors,
            params.n_points(),
            params.n_threads(),
        )?,
        Algorithm::LeeRichards => lee_richards::run(
            positions,
            &inflated,
            &neighbors,
            params.n_slices(),
            params.n_threads(),
        )?,
    };
    if areas.len() != positions.len() {
        return Err(EngineError::Internal(format!(
            "algorithm returned {} areas for {} atoms",
            areas.len(),
            positions.len()
        )));
    }

    let result = SasaResult::new(areas, *params);
    info!(total = result.total(), "SASA calculation complete");
    Ok(result)
}

/// Like [`calc_coord`], with coordinates packed as `[x0, y0, z0, x1, ...]`.
pub fn calc_flat(coords: &[f64], radii: &[f64], params: &Parameters) -> Result<SasaResult, EngineError> {
    if coords.len() != 3 * radii.len() {
        return Err(EngineError::InvalidInput(format!(
            "expected {} coordinates for {} radii, got {}",
            3 * radii.len(),
            radii.len(),
            coords.len()
        )));
    }
    let positions: Vec<Point3<f64>> = coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    calc_coord(&positions, radii, params)
}

fn validate_input(positions: &[Point3<f64>], radii: &[f64]) -> Result<(), EngineError> {
    if positions.len() != radii.len() {
        return Err(EngineError::InvalidInput(format!(
            "{} positions but {} radii",
            positions.len(),
            radii.len()
        )));
    }
    if let Some(i) = positions.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
        return Err(EngineError::InvalidInput(format!(
            "atom {} has a non-finite coordinate",
            i
        )));
    }
    if let Some(i) = radii.iter().position(|r| !r.is_finite() || *r < 0.0) {
        return Err(EngineError::InvalidInput(format!(
            "atom {} has invalid radius {}",
            i, radii[i]
        )));
    }
    Ok(())
}
