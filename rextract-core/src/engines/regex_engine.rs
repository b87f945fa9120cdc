// rextract-core/src/engines/regex_engine.rs
//! An `ExtractionEngine` implementation that runs compiled regex queries
//! against encoded input: decode, split into lines, select the configured
//! match occurrence, expand the output template.
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use crate::compiler::{get_or_compile_queries, CompiledQueries, CompiledQuery};
use crate::config::QueryConfig;
use crate::decode::decode;
use crate::engine::ExtractionEngine;
use crate::extraction_match::{log_extraction_debug, ExtractionMatch};
use crate::lines::split_lines;
use crate::selector::select_match;

#[derive(Debug)]
pub struct RegexExtractor {
    compiled_queries: Arc<CompiledQueries>,
    config: QueryConfig,
}

impl RegexExtractor {
    pub fn new(config: QueryConfig) -> Result<Self> {
        let compiled_queries = get_or_compile_queries(&config)
            .context("Failed to compile extraction queries for RegexExtractor")?;

        Ok(Self { compiled_queries, config })
    }

    fn run_query(
        &self,
        query: &CompiledQuery,
        raw: &[u8],
        source_id: &str,
    ) -> Result<Option<ExtractionMatch>> {
        let text = decode(raw, &query.encoding)
            .with_context(|| format!("Failed to decode input for query '{}'", query.name))?;

        let selection = match select_match(split_lines(&text), &query.regex, query.window, &query.template)
        {
            Some(selection) => selection,
            None => return Ok(None),
        };

        log_extraction_debug(module_path!(), &query.name, &selection.value, selection.line_number);

        Ok(Some(ExtractionMatch {
            query_name: query.name.clone(),
            value: selection.value,
            whole_match: selection.whole_match,
            line_number: selection.line_number,
            occurrence: selection.occurrence,
            source_id: source_id.to_string(),
            timestamp: Some(Utc::now().to_rfc3339()),
        }))
    }

}

impl ExtractionEngine for RegexExtractor {
    fn extract_all(&self, raw: &[u8], source_id: &str) -> Result<Vec<ExtractionMatch>> {
        let enabled_by_name: HashMap<&str, Option<bool>> =
            self.config.queries.iter().map(|q| (q.name.as_str(), q.enabled)).collect();
        let mut matches = Vec::new();
        for query in &self.compiled_queries.queries {
            if matches!(enabled_by_name.get(query.name.as_str()), Some(Some(false))) {
                continue;
            }
            if let Some(m) = self.run_query(query, raw, source_id)? {
                matches.push(m);
            }
        }
        Ok(matches)
    }

    fn extract_one(
        &self,
        raw: &[u8],
        source_id: &str,
        query_name: &str,
    ) -> Result<Option<ExtractionMatch>> {
        let query = self
            .compiled_queries
            .queries
            .iter()
            .find(|q| q.name == query_name)
            .ok_or_else(|| anyhow!("Unknown query '{}'", query_name))?;
        self.run_query(query, raw, source_id)
    }

    fn compiled_queries(&self) -> &CompiledQueries {
        &self.compiled_queries
    }

    fn config(&self) -> &QueryConfig {
        &self.config
    }
}
