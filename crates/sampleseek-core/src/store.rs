//! Store: the persistence contract the resolver consumes.
//!
//! Each query method applies case-insensitive substring comparison and strict
//! project scoping. Stage-based queries return one sample per matching stage,
//! so the same sample may appear more than once; de-duplication is the
//! resolver's job, not the store's.

use crate::pattern::LikePattern;
use crate::types::{Project, ProjectId, Sample};

/// Whether a store may be queried from several execution contexts at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// Safe to call from any thread concurrently.
    Shared,
    /// Every call must come from the caller's own context, one at a time.
    SingleContext,
}

/// Failure raised by a store query.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query {query} failed: {reason}")]
    Query { query: &'static str, reason: String },
}

/// Read-only access to projects and samples.
pub trait SampleStore: Send + Sync {
    /// Declares whether the worker-pool strategy may be used with this store.
    fn concurrency(&self) -> Concurrency;

    fn project_by_obfuscated_id(&self, obfuscated_id: &str) -> Result<Option<Project>, StoreError>;

    /// Samples in `project` whose name matches `pattern`.
    fn samples_by_name(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError>;

    /// Samples in `project` with a stage whose annotation matches `pattern`,
    /// once per matching stage.
    fn samples_by_stage_annotation(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError>;

    /// Samples in `project` with a stage whose method name matches `pattern`,
    /// once per matching stage.
    fn samples_by_stage_method(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError>;
}
