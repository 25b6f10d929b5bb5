use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid entry '{entry}' in '{path}': {message}")]
    Validation {
        path: String,
        entry: String,
        message: String,
    },
    #[error("Unknown standard classifier '{0}' (expected one of: protor, oons, naccess)")]
    UnknownStandard(String),
}
