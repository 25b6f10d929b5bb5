use sasakit::core::classifier::ClassifierError;
use sasakit::core::models::error::ModelError;
use sasakit::engine::config::ParameterError;
use sasakit::workflows::error::CalcError;
use sasakit::workflows::selection::SelectionError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Invalid parameters: {0}")]
    Parameters(#[from] ParameterError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to format report: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
