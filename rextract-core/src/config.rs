//! Configuration management for `rextract-core`.
//!
//! Defines the serde-facing description of extraction queries, loads them
//! from YAML (a user file or the embedded defaults), merges user queries over
//! defaults, and validates them before compilation.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::template;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Describes one extraction: which pattern to look for, how the input is
/// encoded, which match occurrence to pick, and how to render the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionQuery {
    /// Unique identifier for the query (e.g. "nginx_worker_count").
    pub name: String,
    /// Human-readable description of what the query extracts.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Character encoding label of the input bytes; empty means UTF-8.
    pub encoding: String,
    /// First match occurrence considered selectable (1-indexed, inclusive).
    pub start_occurrence: Option<u64>,
    /// Last match occurrence considered selectable (1-indexed, inclusive).
    pub end_occurrence: Option<u64>,
    /// Output template; empty returns the whole matching line.
    pub output: String,
    /// Explicit override for enabling/disabling the query.
    pub enabled: Option<bool>,
}

impl Default for ExtractionQuery {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            encoding: String::new(),
            start_occurrence: None,
            end_occurrence: None,
            output: String::new(),
            enabled: None,
        }
    }
}

/// Represents the top-level configuration structure for rextract.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct QueryConfig {
    /// The extraction queries to run, in declared order.
    pub queries: Vec<ExtractionQuery>,
}

impl QueryConfig {
    /// Loads extraction queries from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading queries from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display()))?;
        let config: QueryConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse query file {}", path.display()))?;

        validate_queries(&config.queries)?;
        info!("Loaded {} queries from file {}.", config.queries.len(), path.display());

        Ok(config)
    }

    /// Loads the default queries embedded in the library.
    pub fn load_default_queries() -> Result<Self> {
        debug!("Loading default queries from embedded string...");
        let default_yaml = include_str!("../config/default_queries.yaml");
        let config: QueryConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default queries")?;

        debug!("Loaded {} default queries.", config.queries.len());
        Ok(config)
    }

    /// Filters active queries based on enable/disable lists provided via CLI.
    pub fn set_active_queries(&mut self, enable: &[String], disable: &[String]) {
        let enable_set: HashSet<&str> = enable.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable.iter().map(String::as_str).collect();

        debug!("Initial query count before filtering: {}", self.queries.len());

        let all_names: HashSet<&str> = self.queries.iter().map(|q| q.name.as_str()).collect();
        for name in enable_set.difference(&all_names) {
            warn!("Query '{}' in enable list does not exist.", name);
        }
        for name in disable_set.difference(&all_names) {
            warn!("Query '{}' in disable list does not exist.", name);
        }

        self.queries.retain(|query| {
            let name = query.name.as_str();
            !disable_set.contains(name) && (enable_set.is_empty() || enable_set.contains(name))
        });

        debug!("Final active query count after filtering: {}", self.queries.len());
    }
}

/// Merges user-defined queries with defaults; user queries win by name.
pub fn merge_queries(default_config: QueryConfig, user_config: Option<QueryConfig>) -> QueryConfig {
    debug!("merge_queries called. Initial default query count: {}", default_config.queries.len());

    let mut order: Vec<String> = default_config.queries.iter().map(|q| q.name.clone()).collect();
    let mut merged: HashMap<String, ExtractionQuery> = default_config
        .queries
        .into_iter()
        .map(|query| (query.name.clone(), query))
        .collect();

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user queries.", user_cfg.queries.len());
        for user_query in user_cfg.queries {
            if !merged.contains_key(&user_query.name) {
                order.push(user_query.name.clone());
            }
            merged.insert(user_query.name.clone(), user_query);
        }
    }

    let queries: Vec<ExtractionQuery> =
        order.into_iter().filter_map(|name| merged.remove(&name)).collect();
    debug!("Final total queries after merge: {}", queries.len());

    QueryConfig { queries }
}

/// Validates query integrity: names, patterns, and output templates.
///
/// Malformed templates are legal at runtime (they degrade to whole-match
/// output) and only warn here; a backreference beyond the pattern's capture
/// group count is almost always a typo and is rejected.
pub fn validate_queries(queries: &[ExtractionQuery]) -> Result<()> {
    let mut names = HashSet::new();
    let mut errors = Vec::new();

    for query in queries {
        if query.name.is_empty() {
            errors.push("A query has an empty `name` field.".to_string());
        } else if !names.insert(query.name.clone()) {
            errors.push(format!("Duplicate query name found: '{}'.", query.name));
        }

        let pattern = match &query.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Query '{}' is missing the `pattern` field.", query.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Query '{}' has an empty `pattern` field.", query.name));
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Query '{}': pattern length ({}) exceeds maximum allowed ({}).",
                query.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
        }

        let group_count = match Regex::new(pattern) {
            Ok(re) => re.captures_len() - 1,
            Err(e) => {
                errors.push(format!("Query '{}' has an invalid regex pattern: {}", query.name, e));
                continue;
            }
        };

        match template::referenced_groups(&query.output) {
            None => {
                warn!(
                    "Query '{}': output template is malformed and will degrade to whole-match output.",
                    query.name
                );
            }
            Some(refs) => {
                for n in refs {
                    if usize::from(n) > group_count {
                        errors.push(format!(
                            "Query '{}': output references non-existent capture group '\\{}'.",
                            query.name, n
                        ));
                    }
                }
            }
        }

        if let (Some(start), Some(end)) = (query.start_occurrence, query.end_occurrence) {
            if start > end {
                warn!(
                    "Query '{}': occurrence window {}..{} is empty and will never select a match.",
                    query.name, start, end
                );
            }
        }
    }

    if !errors.is_empty() {
        Err(anyhow!(format!("Query validation failed:\n{}", errors.join("\n"))))
    } else {
        Ok(())
    }
}
