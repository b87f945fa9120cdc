// rextract-core/src/engine.rs
//! Defines the core ExtractionEngine trait.
//!
//! The trait decouples callers (CLI, host integrations) from the concrete
//! matching implementation, so engines with different matching strategies can
//! be used interchangeably behind the same contract.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;

use crate::compiler::CompiledQueries;
use crate::config::QueryConfig;
use crate::extraction_match::ExtractionMatch;

/// A trait that defines the core functionality of an extraction engine.
///
/// Engines are synchronous and stateless across invocations: each call
/// operates on the raw bytes of one source and returns per-query results.
/// "No occurrence inside the window" is a well-defined outcome (`None` /
/// absent record), never an error; errors are reserved for collaborator
/// failures such as an unknown encoding or invalid input bytes.
pub trait ExtractionEngine: Send + Sync {
    /// Runs every enabled query against `raw` and returns a record per query
    /// that selected an occurrence, in query order.
    ///
    /// # Arguments
    /// * `raw` - The undecoded content of the source.
    /// * `source_id` - The name or identifier of the source being processed.
    fn extract_all(&self, raw: &[u8], source_id: &str) -> Result<Vec<ExtractionMatch>>;

    /// Runs the single named query against `raw`. `Ok(None)` means the query
    /// matched no selectable occurrence; an unknown query name is an error.
    fn extract_one(
        &self,
        raw: &[u8],
        source_id: &str,
        query_name: &str,
    ) -> Result<Option<ExtractionMatch>>;

    /// Returns a reference to the `CompiledQueries` used by the engine.
    fn compiled_queries(&self) -> &CompiledQueries;

    /// Returns a reference to the engine's configuration.
    fn config(&self) -> &QueryConfig;
}
