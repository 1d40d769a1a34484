//! Error types for algoscope-playback.

use thiserror::Error;

/// Errors from engine controls. None are fatal; every one is recoverable by
/// reset and retry.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A dataset edit arrived while a session was playing or paused.
    #[error("dataset edits are rejected while a session is active")]
    EditWhileRunning,

    /// Pause was requested with no live session.
    #[error("no active session")]
    NoSession,

    /// Resume was requested but nothing is paused.
    #[error("nothing to resume")]
    NothingToResume,

    /// The edit targets a different dataset shape than this engine drives.
    #[error("edit does not apply to this visualizer's dataset")]
    WrongVisualizer,

    /// The recorder refused to produce a trace.
    #[error(transparent)]
    Recorder(#[from] algoscope_trace::RecorderError),

    /// The dataset rejected an edit.
    #[error(transparent)]
    Dataset(#[from] algoscope_dataset::DatasetError),
}
