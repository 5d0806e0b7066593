//! Typed errors that callers need to tell apart.
//!
//! Everything else travels as `anyhow::Error` with context attached.

use thiserror::Error;

/// An external command exited non-zero.
///
/// `stderr` is kept exactly as captured so the top level can echo it
/// unchanged before exiting.
#[derive(Error, Debug, Clone)]
#[error("{message} (exit code {code})")]
pub struct CommandFailure {
    pub program: String,
    pub code: i32,
    pub message: String,
    pub stderr: String,
}

/// Module metadata text that cannot be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("module metadata has no `name:` line")]
    MissingName,

    #[error("`{0}` line has no value: {1:?}")]
    MissingValue(&'static str, String),
}
