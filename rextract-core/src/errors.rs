//! errors.rs - Custom error types for the rextract-core library.
//!
//! All failure modes of the library are collaborator-level: a query whose
//! pattern does not compile, or input bytes that cannot be decoded. The
//! extraction engine itself (template expansion, occurrence selection) never
//! fails; it degrades to a whole-match or no-match result instead.
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

/// This enum represents all possible error types in the `rextract-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("Failed to compile pattern for query '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Query '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Unsupported character encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("Input is not a valid byte sequence for encoding '{0}'")]
    InvalidByteSequence(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
