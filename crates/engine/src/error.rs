//! The module contains the errors the engine can throw.
//!
//! Validation rejections ([`Validation`]) leave the bill untouched: the
//! rejected operation is a no-op and front ends may surface it as an inline
//! message or simply keep the triggering control disabled.
//!
//!  [`Validation`]: EngineError::Validation

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("no active bill")]
    NoBill,
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("invalid group code: {0}")]
    InvalidGroupCode(String),
    #[error("no assignment edit in progress")]
    NoEditSession,
}
