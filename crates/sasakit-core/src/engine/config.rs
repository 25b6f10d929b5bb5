use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_N_POINTS: usize = 100;
pub const DEFAULT_N_SLICES: usize = 20;
pub const DEFAULT_N_THREADS: usize = 2;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParameterError {
    #[error("Probe radius must be finite and non-negative (got {0})")]
    InvalidProbeRadius(f64),
    #[error("Number of test points must be positive")]
    InvalidPointCount,
    #[error("Number of slices per atom must be positive")]
    InvalidSliceCount,
    #[error("Number of threads must be positive")]
    InvalidThreadCount,
    #[error("Unknown algorithm '{0}' (expected 'lee-richards' or 'shrake-rupley')")]
    UnknownAlgorithm(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    LeeRichards,
    ShrakeRupley,
}

impl FromStr for Algorithm {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lr" | "lee-richards" | "leerichards" => Ok(Algorithm::LeeRichards),
            "sr" | "shrake-rupley" | "shrakerupley" => Ok(Algorithm::ShrakeRupley),
            _ => Err(ParameterError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::LeeRichards => write!(f, "Lee & Richards"),
            Algorithm::ShrakeRupley => write!(f, "Shrake & Rupley"),
        }
    }
}

/// Calculation parameters.
///
/// Fields are private so that every value reaching the algorithms has passed
/// validation; use the setters or [`ParametersBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    algorithm: Algorithm,
    probe_radius: f64,
    n_points: usize,
    n_slices: usize,
    n_threads: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            probe_radius: DEFAULT_PROBE_RADIUS,
            n_points: DEFAULT_N_POINTS,
            n_slices: DEFAULT_N_SLICES,
            n_threads: DEFAULT_N_THREADS,
        }
    }
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::new()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    pub fn probe_radius(&self) -> f64 {
        self.probe_radius
    }
    /// Test points per atom (Shrake-Rupley).
    pub fn n_points(&self) -> usize {
        self.n_points
    }
    /// Slices per atom (Lee-Richards).
    pub fn n_slices(&self) -> usize {
        self.n_slices
    }
    pub fn n_threads(&self) -> usize {
        self.n_threads
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn set_probe_radius(&mut self, probe_radius: f64) -> Result<(), ParameterError> {
        check_probe_radius(probe_radius)?;
        self.probe_radius = probe_radius;
        Ok(())
    }

    pub fn set_n_points(&mut self, n_points: usize) -> Result<(), ParameterError> {
        check_positive(n_points, ParameterError::InvalidPointCount)?;
        self.n_points = n_points;
        Ok(())
    }

    pub fn set_n_slices(&mut self, n_slices: usize) -> Result<(), ParameterError> {
        check_positive(n_slices, ParameterError::InvalidSliceCount)?;
        self.n_slices = n_slices;
        Ok(())
    }

    pub fn set_n_threads(&mut self, n_threads: usize) -> Result<(), ParameterError> {
        check_positive(n_threads, ParameterError::InvalidThreadCount)?;
        self.n_threads = n_threads;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        check_probe_radius(self.probe_radius)?;
        check_positive(self.n_points, ParameterError::InvalidPointCount)?;
        check_positive(self.n_slices, ParameterError::InvalidSliceCount)?;
        check_positive(self.n_threads, ParameterError::InvalidThreadCount)
    }
}

fn check_probe_radius(probe_radius: f64) -> Result<(), ParameterError> {
    if probe_radius.is_finite() && probe_radius >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidProbeRadius(probe_radius))
    }
}

fn check_positive(value: usize, err: ParameterError) -> Result<(), ParameterError> {
    if value > 0 { Ok(()) } else { Err(err) }
}

#[derive(Debug, Default)]
pub struct ParametersBuilder {
    algorithm: Option<Algorithm>,
    probe_radius: Option<f64>,
    n_points: Option<usize>,
    n_slices: Option<usize>,
    n_threads: Option<usize>,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
    pub fn probe_radius(mut self, probe_radius: f64) -> Self {
        self.probe_radius = Some(probe_radius);
        self
    }
    pub fn n_points(mut self, n_points: usize) -> Self {
        self.n_points = Some(n_points);
        self
    }
    pub fn n_slices(mut self, n_slices: usize) -> Self {
        self.n_slices = Some(n_slices);
        self
    }
    pub fn n_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = Some(n_threads);
        self
    }

    /// Fills unset fields with defaults and validates the result.
    pub fn build(self) -> Result<Parameters, ParameterError> {
        let params = Parameters {
            algorithm: self.algorithm.unwrap_or_default(),
            probe_radius: self.probe_radius.unwrap_or(DEFAULT_PROBE_RADIUS),
            n_points: self.n_points.unwrap_or(DEFAULT_N_POINTS),
            n_slices: self.n_slices.unwrap_or(DEFAULT_N_SLICES),
            n_threads: self.n_threads.unwrap_or(DEFAULT_N_THREADS),
        };
        params.validate()?;
        Ok(params)
    }
}
