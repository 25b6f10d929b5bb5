//! # Selections
//!
//! Named atom subsets written as `name, expression`, for example
//! `"polar-ends, resn ser+thr and not name N+C+O+CA"`.
//!
//! ```text
//! selection := name "," expr
//! expr      := and_expr ("or" and_expr)*
//! and_expr  := not_expr ("and" not_expr)*
//! not_expr  := "not" not_expr | primary
//! primary   := "(" expr ")" | "resn" list | "resi" ranges
//!            | "name" list | "symbol" list | "chain" list
//! list      := item ("+" item)*
//! ranges    := range ("+" range)*
//! range     := number ["-" number]
//! ```
//!
//! Keywords and residue, atom and element names match case-insensitively; chain
//! labels are case-sensitive. Residue numbers may carry an insertion code
//! (`82A`) and be negative (`-3`).

use thiserror::Error;

pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use evaluator::{Selection, SelectionArea, select_area};

/// A lexing or parsing failure at a byte offset of the expression source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Invalid selection '{selection}' at position {position}: {message}")]
    Syntax {
        selection: String,
        message: String,
        position: usize,
    },

    #[error("Result has {result} atom areas but the structure has {structure} atoms")]
    ResultMismatch { structure: usize, result: usize },
}
