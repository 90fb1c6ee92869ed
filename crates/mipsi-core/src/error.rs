//! Error taxonomy for the bootstrap sequence.

use crate::state::Phase;
use thiserror::Error;

/// Why the computation module could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleLoadFailure {
    /// The loader's promise rejected (network error, syntax error, ...).
    #[error("module load rejected: {0}")]
    Rejected(String),
    /// The module loaded but does not export a required entry point.
    #[error("module does not export `{0}`")]
    MissingExport(&'static str),
    #[error("module load timed out after {after_ms} ms")]
    TimedOut { after_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadFailure),

    #[error("element `#{id}` not found")]
    ElementNotFound { id: String },

    #[error("element `#{id}` is not a {expected}")]
    ElementType { id: String, expected: &'static str },

    #[error("invalid surface {width}x{height} with unit {unit_width}x{unit_height}")]
    InvalidSurface {
        width: u32,
        height: u32,
        unit_width: u32,
        unit_height: u32,
    },

    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error("invalid config: {0}")]
    Config(String),

    /// A host call failed; carries the stringified host error.
    #[error("host error: {0}")]
    Host(String),
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
