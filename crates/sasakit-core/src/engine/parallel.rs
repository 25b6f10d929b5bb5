use super::error::EngineError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates `f` for every atom index `0..n` and collects the results in order.
///
/// With more than one thread the work runs in a dedicated pool of `n_threads`
/// workers, so callers never share the global rayon pool. Each index writes only
/// its own slot, so the output is identical for any thread count.
#[cfg(feature = "parallel")]
pub(crate) fn map_atoms<F>(n: usize, n_threads: usize, f: F) -> Result<Vec<f64>, EngineError>
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    if n_threads <= 1 || n < 2 {
        return Ok((0..n).map(f).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
    Ok(pool.install(|| (0..n).into_par_iter().map(&f).collect()))
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_atoms<F>(n: usize, _n_threads: usize, f: F) -> Result<Vec<f64>, EngineError>
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    Ok((0..n).map(f).collect())
}
