//! Error types for the reference viewer library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// A persisted overlay entry could not be rebuilt into a record.
    #[error("corrupt reference viewer settings{}: {source}", entry_suffix(.index))]
    CorruptSettings {
        /// Position of the offending entry, `None` when the stored value
        /// is not a sequence at all.
        index: Option<usize>,
        #[source]
        source: serde_json::Error,
    },
    #[error("preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} holds {found} instead of a JSON object")]
    NotAnObject { path: PathBuf, found: &'static str },
    #[error("preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to load UFO {path}: {message}")]
    Ufo { path: PathBuf, message: String },
}

fn entry_suffix(index: &Option<usize>) -> String {
    index
        .map(|index| format!(" (entry {index})"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, OverlayError>;
