//! Error type shared by every stage of the data-file preparation
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

/// Failures of a preparation run. All of them are fatal to the run.
#[derive(Debug, Error)]
pub enum PrepError {
  /// A filesystem operation on `path` failed
  #[error("I/O error on {}: {source}", .path.display())]
  Io {
    /// the file or directory being accessed
    path: PathBuf,
    /// the underlying failure
    #[source]
    source: io::Error,
  },
  /// An I/O failure on an already opened stream
  #[error("stream I/O error: {0}")]
  Stream(#[from] io::Error),
  /// The external tokenizer could not be started at all
  #[error("could not launch tokenizer `{program}`: {source}")]
  TokenizerLaunch {
    /// program name as given on the command line
    program: String,
    /// the underlying failure
    #[source]
    source: io::Error,
  },
  /// The external tokenizer ran but reported failure
  #[error("tokenizer exited unsuccessfully ({status})")]
  TokenizerFailed {
    /// exit status of the subprocess
    status: ExitStatus,
  },
  /// The stream ended in the middle of a length-prefixed record
  #[error("truncated record: expected {expected} bytes, found {found}")]
  TruncatedRecord {
    /// bytes announced by the prefix (or 8 for the prefix itself)
    expected: u64,
    /// bytes actually available
    found: u64,
  },
  /// The record bytes are not a well-formed example message
  #[error("malformed record: {0}")]
  MalformedRecord(String),
  /// A decoded record lacks one of its two text features
  #[error("record has no `{0}` feature")]
  MissingField(&'static str),
}

/// Result alias for the library
pub type Result<T> = std::result::Result<T, PrepError>;

/// Attach a path to an `io::Error`, for use with `map_err`
pub fn io_at<P: AsRef<Path>>(path: P) -> impl FnOnce(io::Error) -> PrepError {
  let path = path.as_ref().to_path_buf();
  move |source| PrepError::Io { path, source }
}
