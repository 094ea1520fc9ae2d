use std::num::{ParseIntError, TryFromIntError};
use std::str::Utf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Empty version")]
    EmptyInput,

    #[error("Malformed version: {0:?}")]
    MalformedVersion(String),

    #[error("Invalid numeric component: {0}")]
    InvalidNumber(#[from] ParseIntError),

    #[error("Component out of range: {0}")]
    ComponentOverflow(#[from] TryFromIntError),

    #[error("Truncated binary input: need {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("Suffix too long for binary encoding: {len} bytes")]
    Oversized { len: usize },

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("Not a strict semantic version: {0}")]
    Strict(#[from] semver::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
