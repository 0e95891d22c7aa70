use std::path::PathBuf;

use thiserror::Error;

/// Failures of the external transcription collaborators.
///
/// `ToolUnavailable` is the only one raised before any batch work starts;
/// the others are per-file and the batch continues past them.
#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("{tool} is not installed")]
    ToolUnavailable { tool: String },
    #[error("format conversion failed for {path}: {message}")]
    NormalizeFailed { path: PathBuf, message: String },
    #[error("transcription failed for {path}: {message}")]
    TranscriptionFailed { path: PathBuf, message: String },
    #[error("i/o error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
