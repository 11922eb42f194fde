//! Error types for clique-metaheur.
//!
//! Recoverable problems (bad input files, invalid parameters, seed lists that
//! do not fit the graph) are reported as [`CliqueError`]. Broken search
//! invariants, such as a non-clique reaching a fitness function, are
//! programming faults and panic instead.

use thiserror::Error;

/// Result type alias for clique-metaheur operations.
pub type CliqueResult<T> = Result<T, CliqueError>;

/// Unified error type for graph loading and runner construction.
#[derive(Debug, Error)]
pub enum CliqueError {
    /// Reading the edge-list file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the edge list could not be parsed.
    #[error("edge list line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// An edge appeared before the `p` problem line, or no problem line exists.
    #[error("edge list has no problem line before its edges")]
    MissingHeader,

    /// A vertex id does not fit the declared vertex count.
    #[error("vertex {vertex} out of range for a graph with {vertices} vertices")]
    VertexOutOfRange {
        /// The offending vertex id, as given by the caller.
        vertex: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },

    /// A vertex list contains the same vertex twice.
    #[error("vertex {0} appears more than once")]
    DuplicateVertex(usize),

    /// A vertex list that must be a clique is not one.
    #[error("vertex list is not a clique")]
    NotAClique,

    /// Invalid configuration parameter.
    #[error("configuration error: {0}")]
    Config(String),
}
