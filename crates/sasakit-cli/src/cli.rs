use clap::{Args, Parser, Subcommand, ValueEnum};
use sasakit::core::models::builder::UnknownAtomPolicy;
use sasakit::engine::config::Algorithm;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "SASAKit CLI - Solvent accessible surface areas of macromolecules by the Lee-Richards and Shrake-Rupley algorithms.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of worker threads for the calculation.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the solvent accessible surface area of a PDB structure.
    Calc(CalcArgs),
    /// List the standard atom classifiers.
    Classifiers,
}

/// Arguments for the `calc` subcommand.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Path to the input PDB file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a parameters file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Algorithm ---
    /// Algorithm: 'lee-richards' (lr) or 'shrake-rupley' (sr).
    #[arg(short, long, value_name = "NAME")]
    pub algorithm: Option<Algorithm>,

    /// Probe radius in Angstroms.
    #[arg(short, long, value_name = "FLOAT")]
    pub probe_radius: Option<f64>,

    /// Number of test points per atom (Shrake-Rupley).
    #[arg(long, value_name = "INT")]
    pub n_points: Option<usize>,

    /// Number of slices per atom (Lee-Richards).
    #[arg(long, value_name = "INT")]
    pub n_slices: Option<usize>,

    // --- Atoms ---
    /// Atom classifier: a standard name ('protor', 'oons', 'naccess') or a TOML path.
    #[arg(long, value_name = "NAME_OR_PATH")]
    pub classifier: Option<String>,

    /// Residue reference areas for relative SASA, as CSV.
    #[arg(long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Include hydrogen atoms.
    #[arg(long)]
    pub hydrogen: bool,

    /// Include HETATM records.
    #[arg(long)]
    pub hetatm: bool,

    /// What to do with atoms the classifier does not know.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub unknown: Option<UnknownAtoms>,

    #[command(flatten)]
    pub models: ModelHandling,

    /// Calculate each chain separately.
    #[arg(long)]
    pub separate_chains: bool,

    // --- Output ---
    /// Sum the area of a named selection, e.g. "backbone, name N+CA+C+O".
    /// Can be used multiple times.
    #[arg(short = 's', long = "select", value_name = "NAME, EXPR")]
    pub selections: Vec<String>,

    /// Print absolute and relative area per residue.
    #[arg(long)]
    pub residues: bool,
}

/// Mutually exclusive handling of multi-model inputs.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct ModelHandling {
    /// Join all models into one structure.
    #[arg(long)]
    pub join_models: bool,
    /// Calculate each model separately.
    #[arg(long)]
    pub separate_models: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownAtoms {
    /// Guess a radius from the element and warn
    Guess,
    /// Skip the atom silently
    Skip,
    /// Skip the atom and warn
    Warn,
    /// Stop with an error
    Halt,
}

impl From<UnknownAtoms> for UnknownAtomPolicy {
    fn from(value: UnknownAtoms) -> Self {
        match value {
            UnknownAtoms::Guess => UnknownAtomPolicy::Guess,
            UnknownAtoms::Skip => UnknownAtomPolicy::Skip,
            UnknownAtoms::Warn => UnknownAtomPolicy::SkipWithWarning,
            UnknownAtoms::Halt => UnknownAtomPolicy::Halt,
        }
    }
}
