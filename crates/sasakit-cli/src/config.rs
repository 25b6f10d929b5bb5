use crate::cli::{CalcArgs, UnknownAtoms};
use crate::error::{CliError, Result};
use sasakit::core::models::builder::{LoadOptions, ModelMode};
use sasakit::engine::config::{DEFAULT_N_THREADS, Parameters};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileConfig {
    parameters: Option<FileParameters>,
    input: Option<FileInput>,
    #[serde(default)]
    selections: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileParameters {
    algorithm: Option<String>,
    probe_radius: Option<f64>,
    n_points: Option<usize>,
    n_slices: Option<usize>,
    threads: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileInput {
    classifier: Option<String>,
    reference: Option<PathBuf>,
    hydrogen: Option<bool>,
    hetatm: Option<bool>,
    models: Option<FileModelMode>,
    separate_chains: Option<bool>,
    unknown_atoms: Option<FileUnknownAtoms>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum FileModelMode {
    First,
    Join,
    Separate,
}

impl From<FileModelMode> for ModelMode {
    fn from(value: FileModelMode) -> Self {
        match value {
            FileModelMode::First => ModelMode::FirstOnly,
            FileModelMode::Join => ModelMode::Join,
            FileModelMode::Separate => ModelMode::Separate,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum FileUnknownAtoms {
    Guess,
    Skip,
    Warn,
    Halt,
}

impl From<FileUnknownAtoms> for UnknownAtoms {
    fn from(value: FileUnknownAtoms) -> Self {
        match value {
            FileUnknownAtoms::Guess => UnknownAtoms::Guess,
            FileUnknownAtoms::Skip => UnknownAtoms::Skip,
            FileUnknownAtoms::Warn => UnknownAtoms::Warn,
            FileUnknownAtoms::Halt => UnknownAtoms::Halt,
        }
    }
}

impl FileConfig {
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

/// Fully resolved settings for one `calc` invocation.
#[derive(Debug)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub parameters: Parameters,
    pub classifier: String,
    pub reference: Option<PathBuf>,
    pub options: LoadOptions,
    pub selections: Vec<String>,
    pub print_residues: bool,
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(DEFAULT_N_THREADS)
}

/// Merges command-line flags over the optional parameters file over defaults.
pub fn build_config(args: &CalcArgs, threads: Option<usize>) -> Result<AppConfig> {
    let mut file_config = match &args.config {
        Some(path) => {
            debug!("Reading parameters file {:?}", path);
            FileConfig::from_file(path)?
        }
        None => FileConfig::default(),
    };
    let params_file = file_config.parameters.take().unwrap_or_default();
    let input_file = file_config.input.take().unwrap_or_default();

    let mut builder = Parameters::builder();
    let algorithm = match (args.algorithm, params_file.algorithm.as_deref()) {
        (Some(algorithm), _) => Some(algorithm),
        (None, Some(name)) => Some(name.parse()?),
        (None, None) => None,
    };
    if let Some(algorithm) = algorithm {
        builder = builder.algorithm(algorithm);
    }
    if let Some(probe_radius) = args.probe_radius.or(params_file.probe_radius) {
        builder = builder.probe_radius(probe_radius);
    }
    if let Some(n_points) = args.n_points.or(params_file.n_points) {
        builder = builder.n_points(n_points);
    }
    if let Some(n_slices) = args.n_slices.or(params_file.n_slices) {
        builder = builder.n_slices(n_slices);
    }
    let n_threads = threads
        .or(params_file.threads)
        .unwrap_or_else(default_threads);
    let parameters = builder.n_threads(n_threads).build()?;

    let models = if args.models.join_models {
        ModelMode::Join
    } else if args.models.separate_models {
        ModelMode::Separate
    } else {
        input_file.models.map(Into::into).unwrap_or_default()
    };
    let unknown = args
        .unknown
        .or(input_file.unknown_atoms.map(Into::into))
        .unwrap_or(UnknownAtoms::Guess);
    let options = LoadOptions {
        include_hydrogen: args.hydrogen || input_file.hydrogen.unwrap_or(false),
        include_hetatm: args.hetatm || input_file.hetatm.unwrap_or(false),
        models,
        separate_chains: args.separate_chains || input_file.separate_chains.unwrap_or(false),
        unknown_atoms: unknown.into(),
    };

    let mut selections = file_config.selections;
    selections.extend(args.selections.iter().cloned());

    Ok(AppConfig {
        input_path: args.input.clone(),
        parameters,
        classifier: args
            .classifier
            .clone()
            .or(input_file.classifier)
            .unwrap_or_else(|| "protor".to_string()),
        reference: args.reference.clone().or(input_file.reference),
        options,
        selections,
        print_residues: args.residues,
    })
}
