//! Error types for the water-sort solver crate.

use thiserror::Error;

/// Main error type for solver operations.
///
/// A search that finds no solution is not an error; it is reported through
/// `SearchResult::solution_depth`. Only malformed input or an exhausted
/// generation budget surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// An illegal transition was attempted on a state.
    #[error("invalid move {src} -> {target}: {reason}")]
    InvalidMove {
        src: usize,
        target: usize,
        reason: String,
    },

    /// An informed search method was invoked without a heuristic.
    #[error("search method '{method}' requires a heuristic")]
    MissingHeuristic { method: String },

    /// A caller-supplied parameter is outside its legal range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The method identifier passed to `solve` is not recognized.
    #[error("unknown search method '{0}'")]
    UnknownAlgorithm(String),

    /// The generator exhausted its retry budget without producing a puzzle.
    #[error("puzzle generation failed after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
}

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
