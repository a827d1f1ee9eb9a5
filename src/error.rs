//! Error types for the symbol search core engine

use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::PyErr;
use thiserror::Error;

/// Main error type for the symbol search core engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolSearchError {
    /// The alphabet or trial shape cannot produce a valid trial
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The caller stepped outside the trial state machine
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Selection index out of range: {0}")]
    InvalidSelection(usize),
}

impl From<serde_json::Error> for SymbolSearchError {
    fn from(err: serde_json::Error) -> Self {
        SymbolSearchError::Deserialization(err.to_string())
    }
}

impl From<SymbolSearchError> for PyErr {
    fn from(err: SymbolSearchError) -> PyErr {
        match err {
            SymbolSearchError::Configuration(msg) => {
                PyValueError::new_err(format!("Configuration error: {}", msg))
            }
            SymbolSearchError::Deserialization(msg) => {
                PyValueError::new_err(format!("Deserialization error: {}", msg))
            }
            SymbolSearchError::InvalidTransition(msg) => {
                PyRuntimeError::new_err(format!("Invalid transition: {}", msg))
            }
            SymbolSearchError::InvalidSelection(index) => {
                PyIndexError::new_err(format!("Selection index out of range: {}", index))
            }
        }
    }
}

/// Result type alias for the symbol search core engine
pub type Result<T> = std::result::Result<T, SymbolSearchError>;
