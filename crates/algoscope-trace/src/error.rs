//! Error types for algoscope-trace.

use algoscope_dataset::DatasetKind;
use thiserror::Error;

use crate::AlgorithmId;

/// Result type for recorder operations.
pub type Result<T> = std::result::Result<T, RecorderError>;

/// Errors a recorder can report before producing a trace.
///
/// An unreachable pathfinding target and an empty dataset are *not* errors:
/// the former yields a trace with an empty path phase, the latter an empty
/// trace that completes immediately.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    /// Traversal was requested on a graph with no start node selected.
    #[error("no start node selected")]
    NoStartSelected,

    /// The algorithm and dataset shapes do not match.
    #[error("{algorithm} requires a {expected:?} dataset")]
    WrongDataset {
        algorithm: AlgorithmId,
        expected: DatasetKind,
    },
}
