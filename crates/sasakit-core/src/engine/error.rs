use super::config::ParameterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid parameters: {source}")]
    Parameters {
        #[from]
        source: ParameterError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),

    #[error("Atom index {index} is out of bounds for a result with {len} atoms")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
