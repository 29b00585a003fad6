//! Error types for the synonym pipeline.
//!
//! [`SynonymError`] covers failures that abort a run: the dump cannot be read,
//! its XML is malformed, or the dictionary cannot be written. [`RecordSkip`]
//! covers a single redirect page that is dropped while the run continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynonymError {
    /// The dump is missing or unreadable
    #[error("cannot read {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed XML in the dump, or a malformed line in a dictionary file
    #[error("parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// The dictionary could not be written; any previous output is untouched
    #[error("cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SynonymError>;

/// Reason a redirect page contributes nothing to the dictionary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordSkip {
    #[error("malformed redirect directive: {0}")]
    Malformed(String),

    #[error("page has an empty title")]
    EmptyTitle,

    #[error("non-article namespace: {0}")]
    Namespace(String),

    #[error("page redirects to itself")]
    SelfRedirect,
}
