// rextract-core/src/lib.rs
//! # rextract Core Library
//!
//! `rextract-core` provides the platform-independent logic for extracting
//! templated values from encoded text with regular expressions. Given raw
//! bytes, a pattern, an occurrence window, and an output template, it decodes
//! the bytes, scans lines in order, selects the configured match occurrence,
//! and renders the result via backreference substitution.
//!
//! The library is pure and stateless apart from a compiled-query cache: each
//! invocation operates on an immutable snapshot of its input and returns a
//! well-defined result. Malformed templates, out-of-range backreferences, and
//! windows that select nothing degrade gracefully instead of failing; only
//! collaborator-level problems (an invalid pattern, an unknown encoding,
//! undecodable bytes) surface as errors.
//!
//! ## Modules
//!
//! * `config`: Defines `ExtractionQuery` and `QueryConfig`, YAML loading and validation.
//! * `compiler`: Compiles queries into `CompiledQueries`, with a global cache.
//! * `template`: Backreference expansion of output templates.
//! * `selector`: Occurrence counting and selection over ordered lines.
//! * `decode`: Charset decoding of raw input bytes.
//! * `lines`: Terminator-preserving line segmentation.
//! * `engine`: The `ExtractionEngine` trait, enabling a modular design.
//! * `engines`: Concrete implementations of the `ExtractionEngine` trait.
//! * `extraction_match`: Result records and content-safe debug logging.
//! * `oneshot`: One-shot extraction without a `QueryConfig`.
//!
//! ## Usage Example
//!
//! ```rust
//! use rextract_core::extract_once;
//!
//! let raw = b"a:1 b:2\nignored\na:3 b:4\n";
//! let value = extract_once(raw, r"a:([0-9]+) b:([0-9]+)", "", Some(2), None, r"\1,\2")?;
//! assert_eq!(value.as_deref(), Some("3,4"));
//! # Ok::<(), rextract_core::ExtractError>(())
//! ```
//!
//! ## Template semantics
//!
//! `\0` substitutes the whole match, `\1`-`\9` the numbered capture groups
//! (empty when the group is absent or did not participate), `\\N` emits a
//! literal backslash and digit, and any other backslash sequence degrades
//! the whole template to whole-match output. An empty template returns the
//! matching line exactly as read, terminator included.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod compiler;
pub mod config;
pub mod decode;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod extraction_match;
pub mod lines;
pub mod oneshot;
pub mod selector;
pub mod template;

/// Re-exports the public configuration types and functions for managing
/// extraction queries.
pub use config::{merge_queries, validate_queries, ExtractionQuery, QueryConfig, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ExtractError;

/// Re-exports types related to the core extraction engine trait.
pub use engine::ExtractionEngine;

/// Re-exports the concrete `RegexExtractor` implementation.
pub use engines::regex_engine::RegexExtractor;

/// Re-exports result records and content-safe logging helpers.
pub use extraction_match::{elide_content, ExtractionMatch};

/// Re-exports the decoding and line-segmentation collaborators.
pub use decode::decode;
pub use lines::split_lines;

/// Re-exports the expansion and selection primitives.
pub use selector::{extract_match, select_match, OccurrenceWindow, Selection};
pub use template::{expand, Expansion, MatchResult};

/// Re-exports one-shot extraction for hosts that supply a single pattern.
pub use oneshot::{extract_once, extract_selection};

/// Re-exports compiled-query types for advanced usage.
pub use compiler::{compile_queries, get_or_compile_queries, CompiledQueries, CompiledQuery};
