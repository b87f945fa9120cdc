//! compiler.rs - Manages the compilation and caching of extraction queries.
//!
//! Converts a `QueryConfig` into `CompiledQueries` ready for matching. A
//! global, thread-safe cache keyed by a hash of the query set avoids
//! recompiling the same patterns across invocations.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{ExtractionQuery, QueryConfig, MAX_PATTERN_LENGTH};
use crate::errors::ExtractError;
use crate::selector::OccurrenceWindow;

/// One extraction query compiled and ready to run.
#[derive(Debug)]
pub struct CompiledQuery {
    /// The unique name of the query.
    pub name: String,
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The output template applied to the selected occurrence.
    pub template: String,
    /// Which match occurrence to select.
    pub window: OccurrenceWindow,
    /// Encoding label of the input bytes; empty means UTF-8.
    pub encoding: String,
}

/// The full set of compiled queries for one configuration.
#[derive(Debug)]
pub struct CompiledQueries {
    pub queries: Vec<CompiledQuery>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled queries, keyed by a hash of
    /// the query set.
    static ref COMPILED_QUERY_CACHE: RwLock<HashMap<u64, Arc<CompiledQueries>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `QueryConfig` to create a stable cache key.
///
/// Queries are sorted by name first so declaration order does not change the
/// key.
fn hash_config(config: &QueryConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut queries_to_hash = config.queries.clone();
    queries_to_hash.sort_by(|a, b| a.name.cmp(&b.name));
    queries_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a list of `ExtractionQuery`s. This is the low-level function that
/// performs the actual regex compilation; queries without a pattern are
/// skipped with a warning, all other failures are collected and reported
/// together.
pub fn compile_queries(
    queries_to_compile: Vec<ExtractionQuery>,
) -> Result<CompiledQueries, ExtractError> {
    debug!("Starting compilation of {} queries.", queries_to_compile.len());

    let mut compiled_queries = Vec::new();
    let mut compilation_errors = Vec::new();

    for query in queries_to_compile {
        let pattern = match query.pattern.as_ref() {
            Some(pattern) => pattern,
            None => {
                warn!("Skipping query '{}' because its pattern is missing.", &query.name);
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ExtractError::PatternLengthExceeded(
                query.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(pattern)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                debug!("Query '{}' compiled successfully.", &query.name);
                compiled_queries.push(CompiledQuery {
                    name: query.name,
                    regex,
                    template: query.output,
                    window: OccurrenceWindow::new(query.start_occurrence, query.end_occurrence),
                    encoding: query.encoding,
                });
            }
            Err(e) => {
                compilation_errors.push(ExtractError::PatternCompilation(query.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ExtractError::Fatal(format!(
            "Failed to compile {} query(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling queries. Total compiled: {}.", compiled_queries.len());
        Ok(CompiledQueries { queries: compiled_queries })
    }
}

/// Gets a `CompiledQueries` instance from the cache or compiles it if absent.
pub fn get_or_compile_queries(config: &QueryConfig) -> Result<Arc<CompiledQueries>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_QUERY_CACHE.read().unwrap();
        if let Some(queries) = cache.get(&cache_key) {
            debug!("Serving compiled queries from cache for key: {}", &cache_key);
            return Ok(Arc::clone(queries));
        }
    }

    debug!("Compiled queries not found in cache. Compiling now.");
    let compiled = compile_queries(config.queries.clone())?;
    let compiled_arc = Arc::new(compiled);

    COMPILED_QUERY_CACHE.write().unwrap().insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached queries for key: {}", &cache_key);
    Ok(compiled_arc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(name: &str, pattern: &str) -> ExtractionQuery {
        ExtractionQuery {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn compiles_valid_queries() {
        let compiled = compile_queries(vec![query("a", "x([0-9]+)")]).unwrap();
        assert_eq!(compiled.queries.len(), 1);
        assert_eq!(compiled.queries[0].name, "a");
        assert!(compiled.queries[0].regex.is_match("x42"));
    }

    #[test]
    fn collects_all_compilation_failures() {
        let err = compile_queries(vec![query("bad1", "("), query("bad2", "[")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bad1"));
        assert!(msg.contains("bad2"));
    }

    #[test]
    fn rejects_overlong_patterns() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = compile_queries(vec![query("long", &long)]).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum allowed"));
    }

    #[test]
    fn missing_pattern_is_skipped() {
        let q = ExtractionQuery { name: "nopattern".to_string(), ..Default::default() };
        let compiled = compile_queries(vec![q]).unwrap();
        assert!(compiled.queries.is_empty());
    }

    #[test]
    fn cache_returns_same_instance_for_same_config() {
        let config = QueryConfig { queries: vec![query("cached", "a+")] };
        let first = get_or_compile_queries(&config).unwrap();
        let second = get_or_compile_queries(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
