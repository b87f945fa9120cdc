// rextract-core/src/engines/mod.rs
//! Concrete implementations of the `ExtractionEngine` trait.
//!
//! License: MIT OR Apache-2.0

pub mod regex_engine;

pub use regex_engine::RegexExtractor;
