use crate::core::models::error::ModelError;
use crate::engine::error::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Calculation failed: {source}")]
    Engine {
        #[from]
        source: EngineError,
    },

    #[error("Invalid structure: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Result has {result} atom areas but the structure has {structure} atoms")]
    ResultMismatch { structure: usize, result: usize },
}
