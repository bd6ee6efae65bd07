//! The module contains the errors the engine can return.
//!
//! Resolution entry points never error for expected data conditions: a
//! missing cycle is `None` and degenerate inputs resolve to zero amounts.
//! The variants here cover structural validation only: record constructors
//! and canonical-string parsing.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid mortgage terms: {0}")]
    InvalidTerm(String),
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
}
